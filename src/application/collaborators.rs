// Collaborator traits - requests forwarded to the presentation/ingestion side
use async_trait::async_trait;
use std::sync::Arc;

/// Receives write-back and navigation requests; the engine never mutates devices itself
pub trait DeviceCommandSink: Send + Sync {
    /// Forward a decoded image for a device
    fn request_image_update(&self, device_id: &str, image_data_uri: String);

    /// Navigate to device detail
    fn request_device_selection(&self, device_id: &str);
}

/// Decodes a user-selected image into a data URI
#[async_trait]
pub trait ImageReader: Send + Sync {
    async fn read_as_data_uri(&self, source: &str) -> anyhow::Result<String>;
}

#[derive(Clone)]
pub struct ImageUploadService {
    reader: Arc<dyn ImageReader>,
    sink: Arc<dyn DeviceCommandSink>,
}

impl ImageUploadService {
    pub fn new(reader: Arc<dyn ImageReader>, sink: Arc<dyn DeviceCommandSink>) -> Self {
        Self { reader, sink }
    }

    /// Waits for the decode, then forwards (id, payload) unchanged
    pub async fn upload(&self, device_id: &str, source: &str) -> anyhow::Result<()> {
        let data_uri = self.reader.read_as_data_uri(source).await?;
        tracing::debug!(
            "Forwarding image update for device {} ({} bytes)",
            device_id,
            data_uri.len()
        );
        self.sink.request_image_update(device_id, data_uri);
        Ok(())
    }

    pub fn select(&self, device_id: &str) {
        tracing::debug!("Requesting selection of device {}", device_id);
        self.sink.request_device_selection(device_id);
    }
}

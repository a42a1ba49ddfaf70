// Population filter/sort engine - search, severity and project predicates plus ranked ordering
use crate::domain::device::{Device, Project, ProjectScope};
use crate::domain::severity::SeverityLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// No Data first, Critical last
    Ascending,
    #[default]
    Descending,
}

/// Filter and ordering applied to a device population
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub search: String,
    /// Empty accepts every severity
    #[serde(default)]
    pub severities: BTreeSet<SeverityLevel>,
    #[serde(default)]
    pub scope: ProjectScope,
    #[serde(default)]
    pub direction: SortDirection,
}

impl DeviceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_severities(mut self, severities: impl IntoIterator<Item = SeverityLevel>) -> Self {
        self.severities = severities.into_iter().collect();
        self
    }

    pub fn with_scope(mut self, scope: ProjectScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// Case-insensitive substring match on device or station name
pub fn matches_search(device: &Device, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || device.name.to_lowercase().contains(needle_lower)
        || device.station.to_lowercase().contains(needle_lower)
}

pub fn matches_severity(device: &Device, severities: &BTreeSet<SeverityLevel>) -> bool {
    severities.is_empty() || severities.contains(&device.severity)
}

pub fn matches_scope(device: &Device, scope: &ProjectScope) -> bool {
    match scope {
        ProjectScope::All => true,
        ProjectScope::Project(id) => device.project_id.as_deref() == Some(id.as_str()),
    }
}

/// Devices passing every predicate, stably ordered by severity rank.
///
/// A scope naming a project absent from `projects` yields an empty result.
pub fn filter_and_sort<'a>(
    devices: &'a [Device],
    projects: &[Project],
    query: &DeviceQuery,
) -> Vec<&'a Device> {
    if let Err(err) = query.scope.validate(projects) {
        tracing::debug!("{}, returning no devices", err);
        return Vec::new();
    }

    let needle = query.search.to_lowercase();
    let mut selected: Vec<&Device> = devices
        .iter()
        .filter(|d| matches_search(d, &needle))
        .filter(|d| matches_severity(d, &query.severities))
        .filter(|d| matches_scope(d, &query.scope))
        .collect();

    // sort_by is stable, equal ranks keep input order
    match query.direction {
        SortDirection::Ascending => selected.sort_by(|a, b| a.rank().cmp(&b.rank())),
        SortDirection::Descending => selected.sort_by(|a, b| b.rank().cmp(&a.rank())),
    }

    tracing::debug!(
        "Filtered {} of {} devices (search={:?}, severities={}, scope={:?})",
        selected.len(),
        devices.len(),
        query.search,
        query.severities.len(),
        query.scope
    );

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TrendError;

    fn projects() -> Vec<Project> {
        vec![Project::new("p1", "Grid Upgrade"), Project::new("p2", "Substation Retrofit")]
    }

    fn population() -> Vec<Device> {
        vec![
            Device::new("a", "Feeder A", "North Station", SeverityLevel::Warning).with_project("p1"),
            Device::new("b", "Feeder B", "South Station", SeverityLevel::Critical).with_project("p2"),
            Device::new("c", "Bus Coupler", "North Station", SeverityLevel::Normal),
            Device::new("d", "Feeder D", "East Yard", SeverityLevel::Warning).with_project("p1"),
            Device::new("e", "Transformer Bay", "South Station", SeverityLevel::NoData),
            Device::new("f", "Feeder F", "West Yard", SeverityLevel::Critical).with_project("p1"),
        ]
    }

    fn ids(devices: &[&Device]) -> Vec<String> {
        devices.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_critical_and_warning_descending() {
        let devices = vec![
            Device::new("crit", "Bay 1", "S", SeverityLevel::Critical),
            Device::new("norm", "Bay 2", "S", SeverityLevel::Normal),
            Device::new("warn", "Bay 3", "S", SeverityLevel::Warning),
        ];
        let query = DeviceQuery::new()
            .with_severities([SeverityLevel::Critical, SeverityLevel::Warning])
            .with_direction(SortDirection::Descending);

        let result = filter_and_sort(&devices, &[], &query);
        assert_eq!(ids(&result), vec!["crit", "warn"]);
    }

    #[test]
    fn test_unknown_project_scope_is_empty() {
        let devices = population();
        let query = DeviceQuery::new().with_scope(ProjectScope::Project("p9".to_string()));
        assert!(filter_and_sort(&devices, &projects(), &query).is_empty());
    }

    #[test]
    fn test_unknown_project_scope_is_reported_but_filter_degrades() {
        let devices = population();
        let scope = ProjectScope::Project("retired".to_string());

        assert_eq!(
            scope.validate(&projects()),
            Err(TrendError::InvalidProjectScope("retired".to_string()))
        );

        let query = DeviceQuery::new()
            .with_scope(scope)
            .with_severities([SeverityLevel::Critical]);
        let result = filter_and_sort(&devices, &projects(), &query);
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_search_is_not_trimmed() {
        let devices = population();

        let query = DeviceQuery::new().with_search("Feeder A ");
        assert!(filter_and_sort(&devices, &projects(), &query).is_empty());

        // Whitespace is matched literally
        let query = DeviceQuery::new().with_search("   ");
        assert!(filter_and_sort(&devices, &projects(), &query).is_empty());

        let query = DeviceQuery::new().with_search(" ");
        assert_eq!(filter_and_sort(&devices, &projects(), &query).len(), devices.len());
    }

    #[test]
    fn test_project_scope() {
        let devices = population();
        let query = DeviceQuery::new().with_scope(ProjectScope::Project("p1".to_string()));
        let result = filter_and_sort(&devices, &projects(), &query);
        assert_eq!(ids(&result), vec!["f", "a", "d"]);
    }

    #[test]
    fn test_search_matches_name_or_station_case_insensitive() {
        let devices = population();
        let query = DeviceQuery::new().with_search("NORTH");
        assert_eq!(ids(&filter_and_sort(&devices, &projects(), &query)), vec!["a", "c"]);

        let query = DeviceQuery::new().with_search("feeder");
        assert_eq!(
            ids(&filter_and_sort(&devices, &projects(), &query)),
            vec!["b", "f", "a", "d"]
        );
    }

    #[test]
    fn test_empty_severity_set_accepts_all() {
        let devices = population();
        let result = filter_and_sort(&devices, &projects(), &DeviceQuery::new());
        assert_eq!(result.len(), devices.len());

        let query = DeviceQuery::new().with_search("station");
        assert_eq!(filter_and_sort(&devices, &projects(), &query).len(), 4);
    }

    #[test]
    fn test_stable_in_both_directions() {
        let devices = population();

        let desc = DeviceQuery::new().with_direction(SortDirection::Descending);
        assert_eq!(
            ids(&filter_and_sort(&devices, &projects(), &desc)),
            vec!["b", "f", "a", "d", "c", "e"]
        );

        let asc = DeviceQuery::new().with_direction(SortDirection::Ascending);
        assert_eq!(
            ids(&filter_and_sort(&devices, &projects(), &asc)),
            vec!["e", "c", "a", "d", "b", "f"]
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let devices = population();
        let query = DeviceQuery::new()
            .with_search("feeder")
            .with_severities([SeverityLevel::Warning, SeverityLevel::Critical]);
        let first = filter_and_sort(&devices, &projects(), &query);
        let second = filter_and_sort(&devices, &projects(), &query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_results_borrow_population() {
        let devices = population();
        let result = filter_and_sort(&devices, &projects(), &DeviceQuery::new());
        assert!(result.iter().any(|d| std::ptr::eq(*d, &devices[0])));
    }

    #[test]
    fn test_query_deserializes_from_json() {
        let json = r#"{
            "search": "bay",
            "severities": ["CRITICAL", "DANGER"],
            "scope": {"project": "p2"},
            "direction": "ascending"
        }"#;
        let query: DeviceQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.scope, ProjectScope::Project("p2".to_string()));
        assert_eq!(query.direction, SortDirection::Ascending);
        assert_eq!(query.severities.len(), 2);

        let defaults: DeviceQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, DeviceQuery::new());
    }
}

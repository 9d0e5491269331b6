/// A type-safe wrapper for pipeline entry points - units with no declared inputs.
///
/// Entry points can run as soon as a pipeline starts, since they read nothing from
/// other units. They seed both the static order and the dynamic ready queue.
///
/// # Examples
///
/// ## Creating entry points from a vector
/// ```
/// use the_switchyard::config::EntryPoints;
///
/// let entry_points = EntryPoints::from(vec![
///     "fetch_page".to_string(),
///     "load_settings".to_string()
/// ]);
///
/// assert_eq!(entry_points.0.len(), 2);
/// ```
///
/// ## Building entry points incrementally
/// ```
/// use the_switchyard::config::EntryPoints;
///
/// let mut entry_points = EntryPoints::new();
/// entry_points.add("source".to_string());
///
/// assert!(entry_points.contains("source"));
/// assert!(!entry_points.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPoints(pub Vec<String>);

impl EntryPoints {
    /// Create a new empty entrypoints list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add an entrypoint
    pub fn add(&mut self, unit: String) {
        self.0.push(unit);
    }

    /// Get iterator over entrypoints
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.0.iter().any(|u| u == unit)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for EntryPoints {
    fn from(entrypoints: Vec<String>) -> Self {
        Self(entrypoints)
    }
}

impl From<EntryPoints> for Vec<String> {
    fn from(value: EntryPoints) -> Self {
        value.0
    }
}

/// Three-state update for an optional field.
///
/// `NoChange` keeps the stored value, `Set` replaces it and `Clear` removes it.
///
/// ```
/// use sprintcal_domain::FieldUpdate;
///
/// let mut description = Some("kickoff".to_string());
/// FieldUpdate::Set("retro".to_string()).apply_to(&mut description);
/// assert_eq!(description.as_deref(), Some("retro"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut description);
/// assert_eq!(description, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Build from a pair of CLI-style inputs: a new value and a clear flag.
    /// The clear flag wins when both are present.
    pub fn from_flags(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldUpdate::Clear,
            (Some(value), false) => FieldUpdate::Set(value),
            (None, false) => FieldUpdate::NoChange,
        }
    }
}

/// Local, pre-network failures. A draft that produces one of these never
/// reaches the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Unknown completion status: '{0}' (expected Not Started, In Progress, Completed or Platinum)")]
    UnknownStatus(String),

    #[error("Field '{field}' does not exist on the {form} form")]
    FieldNotApplicable {
        field: &'static str,
        form: &'static str,
    },

    #[error("No form is open")]
    NoDraft,
}

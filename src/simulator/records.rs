/// Macro to push a ModelRecord with the cycle index as its timestamp
///
/// Usage:
/// ```ignore
/// cycle_record!(self, t, "action_name", "subject string");
/// cycle_record!(self, t, "action_name", format!("formatted {}", value));
/// ```
#[macro_export]
macro_rules! cycle_record {
  ($self:expr, $cycle:expr, $action:expr, $subject:expr) => {
    $self.records.push(sim::models::ModelRecord {
      time: $cycle as f64,
      action: $action.to_string(),
      subject: $subject.to_string(),
    });
  };
}

pub mod attribution;
pub mod custom_variables;
pub mod params;
pub mod visitor;

pub use attribution::AttributionInfo;
pub use custom_variables::{CustomVariables, CUSTOM_VARIABLE_SLOTS};
pub use params::{ActionType, ParameterSet, TrackingAction};
pub use visitor::{VisitorId, VISITOR_ID_LENGTH};

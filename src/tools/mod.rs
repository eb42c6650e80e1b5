pub mod base;
pub mod client;
pub mod drug_tools;
pub mod profile;
pub mod recalls;
pub mod shortages;

pub use base::{MCPTool, ToolAnnotations};
pub use client::DrugServiceClient;
pub use drug_tools::{DrugTools, TOOL_NAMES};
pub use profile::GetMedicationProfileTool;
pub use recalls::SearchDrugRecallsTool;
pub use shortages::SearchDrugShortagesTool;

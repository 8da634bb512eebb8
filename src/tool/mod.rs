/// Invocation synchrone de l'outil ghmulti.
pub mod invoke;
/// Types sérialisés des réponses JSON de l'outil.
pub mod responses;

pub use invoke::{run_tool, run_tool_checked, InvokeError, RunResult, TOOL_NOT_FOUND_MESSAGE};
pub use responses::{
    AccountRef, DoctorCheck, DoctorResponse, ListResponse, StatusSnapshot, TokenInfo,
    UnlinkResponse,
};

pub mod account;
pub mod loaders;
pub mod outcome;
pub mod request;
pub mod session;

pub use account::{AccountDirectory, AccountRecord};
pub use loaders::load_account_directory;
pub use outcome::{AttendanceOutcome, SuccessMarker};
pub use request::MarkAttendanceRequest;
pub use session::SessionHandle;

pub mod attendance_submitter;
pub mod session_acquirer;

pub use attendance_submitter::AttendanceSubmitter;
pub use session_acquirer::{parse_session_cookie, SessionAcquirer};

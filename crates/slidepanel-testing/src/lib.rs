//! Testing utilities and harness for slidepanel

pub mod host;
pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use host::{FakePanelHost, FakePanelHostBuilder};
pub use recording::{PanelRecord, RecordingCallback};
pub use robot::PanelRobot;

pub mod prelude {
    pub use crate::host::{self, FakePanelHost, FakePanelHostBuilder};
    pub use crate::recording::{PanelRecord, RecordingCallback};
    pub use crate::robot::PanelRobot;
    pub use crate::robot_assertions;
}

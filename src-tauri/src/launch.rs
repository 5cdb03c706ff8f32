use std::{io, process::Command};

use log::{error, info};
use thiserror::Error;

use crate::models::ApplicationDescriptor;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("executable not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("failed to start {executable}: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    fn from_io(executable: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(executable.to_string()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(executable.to_string()),
            _ => Self::Spawn {
                executable: executable.to_string(),
                source: err,
            },
        }
    }
}

/// Starts OS processes on behalf of the launch handler.
pub trait ProcessSpawner: Send + Sync {
    /// Starts `program` with no arguments and returns as soon as the OS has
    /// accepted the request.
    fn spawn(&self, program: &str) -> io::Result<()>;
}

/// Spawns real processes. The child handle is dropped right away, the
/// launched application is never waited on.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, program: &str) -> io::Result<()> {
        Command::new(program).spawn().map(|_| ())
    }
}

pub fn launch(spawner: &dyn ProcessSpawner, app: &ApplicationDescriptor) -> Result<(), LaunchError> {
    info!("launching {} ({})", app.label, app.executable);
    spawner
        .spawn(&app.executable)
        .map_err(|err| LaunchError::from_io(&app.executable, err))
}

/// Click handler for application buttons. Failures are logged and otherwise
/// dropped; there is no retry.
pub fn on_launch_clicked(spawner: &dyn ProcessSpawner, app: &ApplicationDescriptor) {
    if let Err(err) = launch(spawner, app) {
        error!("{} could not be launched: {err}", app.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSpawner {
        calls: Mutex<Vec<String>>,
    }

    impl ProcessSpawner for RecordingSpawner {
        fn spawn(&self, program: &str) -> io::Result<()> {
            self.calls.lock().unwrap().push(program.to_string());
            Ok(())
        }
    }

    struct FailingSpawner(io::ErrorKind);

    impl ProcessSpawner for FailingSpawner {
        fn spawn(&self, _program: &str) -> io::Result<()> {
            Err(io::Error::new(self.0, "spawn refused"))
        }
    }

    fn nuke() -> ApplicationDescriptor {
        ApplicationDescriptor {
            label: "NukeX 11v3".to_string(),
            executable: "nuke".to_string(),
            icon: "File_Plugin_64.png".to_string(),
        }
    }

    #[test]
    fn launch_issues_exactly_one_spawn() {
        let spawner = RecordingSpawner::default();

        on_launch_clicked(&spawner, &nuke());

        assert_eq!(*spawner.calls.lock().unwrap(), ["nuke"]);
    }

    #[test]
    fn io_errors_map_to_launch_errors() {
        let app = nuke();

        let err = launch(&FailingSpawner(io::ErrorKind::NotFound), &app).unwrap_err();
        assert!(matches!(err, LaunchError::NotFound(ref exe) if exe == "nuke"));

        let err = launch(&FailingSpawner(io::ErrorKind::PermissionDenied), &app).unwrap_err();
        assert!(matches!(err, LaunchError::PermissionDenied(_)));

        let err = launch(&FailingSpawner(io::ErrorKind::Other), &app).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
        assert!(err.to_string().contains("spawn refused"));
    }

    #[test]
    fn failed_launch_is_not_fatal() {
        on_launch_clicked(&FailingSpawner(io::ErrorKind::NotFound), &nuke());
    }

    #[test]
    fn system_spawner_reports_missing_executable() {
        let app = ApplicationDescriptor {
            label: "Missing".to_string(),
            executable: "avalon-launcher-no-such-executable".to_string(),
            icon: String::new(),
        };

        let err = launch(&SystemSpawner, &app).unwrap_err();
        assert!(matches!(err, LaunchError::NotFound(_)));
    }
}

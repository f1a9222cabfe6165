use std::fmt;

/// Stages of a layout run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Classification,
    Placement,
    Orbitals,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Classification => "Classification",
            Self::Placement => "Placement",
            Self::Orbitals => "Orbital generation",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { phase: Phase },
    PhaseFinish { phase: Phase },

    /// One more atom has its lobes generated.
    AtomDone { completed: usize, total: usize },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn silent_reporter_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::Message("nobody listens".to_string()));
    }

    #[test]
    fn callback_receives_events_in_order() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        reporter.report(Progress::PhaseStart {
            phase: Phase::Placement,
        });
        reporter.report(Progress::PhaseFinish {
            phase: Phase::Placement,
        });
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::PhaseStart {
                    phase: Phase::Placement
                },
                Progress::PhaseFinish {
                    phase: Phase::Placement
                },
            ]
        );
    }

    #[test]
    fn phase_names_are_human_readable() {
        assert_eq!(Phase::Orbitals.to_string(), "Orbital generation");
    }
}

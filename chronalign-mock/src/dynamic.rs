use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use chronalign_core::{
    AlignError, DataSource, FetchResult, FieldList, GroupOfDates, Timestamp,
};

use crate::EmptyGroupBehavior;

/// Instruction for how the source should answer for a given date.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(AlignError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<Timestamp, MockBehavior<FieldList>>,
    on_empty: EmptyGroupBehavior,
    requests: Vec<GroupOfDates>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for requests touching `date`.
    pub async fn set_behavior(&self, date: Timestamp, behavior: MockBehavior<FieldList>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(date, behavior);
    }

    /// Set how an empty group is answered.
    pub async fn set_empty_group_behavior(&self, behavior: EmptyGroupBehavior) {
        let mut guard = self.state.lock().await;
        guard.on_empty = behavior;
    }

    /// Return a copy of every group received so far, in call order.
    pub async fn requests(&self) -> Vec<GroupOfDates> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.on_empty = EmptyGroupBehavior::default();
        guard.requests.clear();
    }
}

/// A data source that defers all behavior to an external controller.
///
/// Dates without a rule are treated as holes: skipped for `partial_ok`
/// groups, a `NoData` error otherwise.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn DataSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn DataSource>, controller)
    }
}

#[async_trait]
impl DataSource for DynamicMockSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn select(&self, group: &GroupOfDates) -> Result<FetchResult, AlignError> {
        // Log and snapshot the rules without holding the lock across await points
        let (behaviors, on_empty) = {
            let mut guard = self.state.lock().await;
            guard.requests.push(group.clone());
            let behaviors: Vec<_> = group
                .iter()
                .map(|d| (*d, guard.rules.get(d).cloned()))
                .collect();
            (behaviors, guard.on_empty.clone())
        };

        if group.is_empty() {
            return match on_empty {
                EmptyGroupBehavior::ReturnEmpty => Ok(FetchResult::empty(group.clone())),
                EmptyGroupBehavior::Fail => {
                    Err(AlignError::source(self.name, "empty group of dates"))
                }
            };
        }

        let mut fields = Vec::new();
        for (date, behavior) in behaviors {
            match behavior {
                Some(MockBehavior::Return(fs)) => fields.extend(fs),
                Some(MockBehavior::Fail(e)) => return Err(e),
                Some(MockBehavior::Hang) => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
                None if group.partial_ok() => {}
                None => {
                    return Err(AlignError::no_data(format!(
                        "{} has no rule for {}",
                        self.name,
                        date.to_rfc3339()
                    )));
                }
            }
        }
        Ok(FetchResult::new(group.clone(), fields))
    }
}

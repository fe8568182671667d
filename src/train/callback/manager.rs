//! Callback manager for dispatching events to multiple callbacks

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Manages multiple callbacks and dispatches events
pub struct CallbackManager {
    callbacks: Vec<Box<dyn TrainerCallback>>,
}

impl CallbackManager {
    /// Create new callback manager
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Add a callback
    pub fn add<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Fire train begin event
    pub fn on_train_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            if cb.on_train_begin(ctx) == CallbackAction::Stop {
                return CallbackAction::Stop;
            }
        }
        CallbackAction::Continue
    }

    /// Fire train end event
    pub fn on_train_end(&mut self, ctx: &CallbackContext) {
        for cb in &mut self.callbacks {
            cb.on_train_end(ctx);
        }
    }

    /// Fire epoch end event
    pub fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        for cb in &mut self.callbacks {
            if cb.on_epoch_end(ctx) == CallbackAction::Stop {
                return CallbackAction::Stop;
            }
        }
        CallbackAction::Continue
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::callback::EarlyStopping;

    #[test]
    fn test_callback_manager_dispatch() {
        let mut manager = CallbackManager::new();
        manager.add(EarlyStopping::new(1, 0.001));

        let mut ctx = CallbackContext {
            val_loss: Some(1.0),
            ..Default::default()
        };

        // First epoch establishes the baseline
        assert_eq!(manager.on_epoch_end(&ctx), CallbackAction::Continue);

        // Second epoch with no improvement stops (patience = 1)
        ctx.epoch = 1;
        assert_eq!(manager.on_epoch_end(&ctx), CallbackAction::Stop);
    }

    #[test]
    fn test_callback_manager_len_and_empty() {
        let mut manager = CallbackManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);

        manager.add(EarlyStopping::new(3, 0.001));
        assert!(!manager.is_empty());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_callback_manager_stop_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct CountingStop {
            count: Arc<AtomicUsize>,
        }
        impl TrainerCallback for CountingStop {
            fn on_train_begin(&mut self, _: &CallbackContext) -> CallbackAction {
                self.count.fetch_add(1, Ordering::SeqCst);
                CallbackAction::Stop
            }
            fn name(&self) -> &'static str {
                "CountingStop"
            }
        }

        struct CountingContinue {
            count: Arc<AtomicUsize>,
        }
        impl TrainerCallback for CountingContinue {
            fn on_train_begin(&mut self, _: &CallbackContext) -> CallbackAction {
                self.count.fetch_add(1, Ordering::SeqCst);
                CallbackAction::Continue
            }
            fn name(&self) -> &'static str {
                "CountingContinue"
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let mut manager = CallbackManager::new();
        manager.add(CountingStop {
            count: count.clone(),
        });
        manager.add(CountingContinue {
            count: count.clone(),
        });

        let action = manager.on_train_begin(&CallbackContext::default());
        assert_eq!(action, CallbackAction::Stop);
        // Second callback never fired
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_manager_train_end_fires_all() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct CountingEnd {
            count: Arc<AtomicUsize>,
        }
        impl TrainerCallback for CountingEnd {
            fn on_train_end(&mut self, _: &CallbackContext) {
                self.count.fetch_add(1, Ordering::SeqCst);
            }
            fn name(&self) -> &'static str {
                "CountingEnd"
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let mut manager = CallbackManager::new();
        for _ in 0..3 {
            manager.add(CountingEnd {
                count: count.clone(),
            });
        }

        manager.on_train_end(&CallbackContext::default());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }
}

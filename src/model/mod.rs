//! Task models
//!
//! One model variant per prediction task, each a linear map over the
//! autograd `linear` op with task-appropriate loss and evaluation metric.
//! The `TaskModel` enum is the closed dispatch surface: a task selector
//! resolves to exactly one variant through an exhaustive match, so an
//! unrecognized task cannot reach model construction.

mod binary;
mod multiclass;
mod regression;

pub use binary::BinaryClassifier;
pub use multiclass::MulticlassClassifier;
pub use regression::Regressor;

use rand::rngs::StdRng;

use crate::io::NamedParam;
use crate::task::Task;
use crate::train::{LossFn, Metric};
use crate::Tensor;

/// Common surface of the task models
pub trait Model {
    /// Compute predictions for a flattened batch of inputs
    fn forward(&self, inputs: &Tensor) -> Tensor;

    /// Parameter tensors as shared-gradient clones (for clipping, snapshots)
    fn params(&self) -> Vec<Tensor>;

    /// Mutable references to the owned parameter tensors (for the optimizer)
    fn params_mut(&mut self) -> Vec<&mut Tensor>;

    /// Named parameter snapshot for checkpointing
    fn snapshot(&self) -> Vec<NamedParam>;

    /// The loss this model trains with
    fn loss(&self) -> Box<dyn LossFn>;

    /// The evaluation metric reported in the test phase
    fn metric(&self) -> Box<dyn Metric>;

    /// Width of one input row
    fn input_dim(&self) -> usize;

    /// Width of one target row
    fn target_dim(&self) -> usize;

    /// Model name (matches its task selector)
    fn name(&self) -> &'static str;
}

/// The closed set of models, one per task
///
/// # Example
///
/// ```
/// use lanzar::model::{Model, TaskModel};
/// use lanzar::task::Task;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(2434);
/// let model = TaskModel::for_task(Task::Binary, 8, 3, &mut rng);
/// assert_eq!(model.name(), "binary");
/// ```
pub enum TaskModel {
    Binary(BinaryClassifier),
    Multiclass(MulticlassClassifier),
    Regression(Regressor),
}

impl TaskModel {
    /// Construct the model for a task from the run's seeded RNG
    ///
    /// `n_classes` is only consulted by the multiclass variant.
    pub fn for_task(task: Task, n_features: usize, n_classes: usize, rng: &mut StdRng) -> Self {
        match task {
            Task::Binary => Self::Binary(BinaryClassifier::new(n_features, rng)),
            Task::Multiclass => {
                Self::Multiclass(MulticlassClassifier::new(n_features, n_classes, rng))
            }
            Task::Regression => Self::Regression(Regressor::new(n_features, rng)),
        }
    }
}

impl Model for TaskModel {
    fn forward(&self, inputs: &Tensor) -> Tensor {
        match self {
            Self::Binary(m) => m.forward(inputs),
            Self::Multiclass(m) => m.forward(inputs),
            Self::Regression(m) => m.forward(inputs),
        }
    }

    fn params(&self) -> Vec<Tensor> {
        match self {
            Self::Binary(m) => m.params(),
            Self::Multiclass(m) => m.params(),
            Self::Regression(m) => m.params(),
        }
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        match self {
            Self::Binary(m) => m.params_mut(),
            Self::Multiclass(m) => m.params_mut(),
            Self::Regression(m) => m.params_mut(),
        }
    }

    fn snapshot(&self) -> Vec<NamedParam> {
        match self {
            Self::Binary(m) => m.snapshot(),
            Self::Multiclass(m) => m.snapshot(),
            Self::Regression(m) => m.snapshot(),
        }
    }

    fn loss(&self) -> Box<dyn LossFn> {
        match self {
            Self::Binary(m) => m.loss(),
            Self::Multiclass(m) => m.loss(),
            Self::Regression(m) => m.loss(),
        }
    }

    fn metric(&self) -> Box<dyn Metric> {
        match self {
            Self::Binary(m) => m.metric(),
            Self::Multiclass(m) => m.metric(),
            Self::Regression(m) => m.metric(),
        }
    }

    fn input_dim(&self) -> usize {
        match self {
            Self::Binary(m) => m.input_dim(),
            Self::Multiclass(m) => m.input_dim(),
            Self::Regression(m) => m.input_dim(),
        }
    }

    fn target_dim(&self) -> usize {
        match self {
            Self::Binary(m) => m.target_dim(),
            Self::Multiclass(m) => m.target_dim(),
            Self::Regression(m) => m.target_dim(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Binary(m) => m.name(),
            Self::Multiclass(m) => m.name(),
            Self::Regression(m) => m.name(),
        }
    }
}

/// Gaussian init scaled for small linear models
pub(crate) fn init_weights(len: usize, rng: &mut StdRng) -> Vec<f32> {
    (0..len)
        .map(|_| 0.1 * crate::data::synthetic::gaussian(rng))
        .collect()
}

//! Configuration resolution and BOM consolidation
//!
//! Selected option ids flow through four steps, each a pure function over
//! a read-only [`CatalogStore`]:
//!
//! 1. [`resolve_options`] - ids → option records (unknown ids dropped)
//! 2. [`aggregate_activations`] - options → module activation quantities
//! 3. [`consolidate_parts`] - modules → per-part totals with provenance
//! 4. [`assemble_bom`] - totals → priced, sorted [`BomResult`]
//!
//! [`BomEngine`] runs the pipeline and reports progress to a [`BomObserver`].

mod activation;
mod assembler;
mod consolidation;
mod observer;
mod resolver;
mod result;

pub use activation::{aggregate_activations, ActivationMap, ModuleActivation};
pub use assembler::assemble_bom;
pub use consolidation::{consolidate_parts, ActivatedModule, ConsolidatedPart, Consolidation};
pub use observer::{BomObserver, NoopObserver, TracingObserver};
pub use resolver::{resolve_options, SelectionPolicy};
pub use result::{BomLineItem, BomResult, BomSummary};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::core::identity::OptionId;
use crate::core::store::{CatalogStore, StoreError};

/// Failures BOM generation surfaces; missing rows are not errors
#[derive(Debug, Error)]
pub enum BomError {
    #[error("catalog store could not answer: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A quantity or money total does not fit its type
    #[error("overflow computing {0}")]
    Overflow(String),
}

static NOOP: NoopObserver = NoopObserver;

/// Runs BOM generation against a catalog store
///
/// The engine holds no per-call state; one engine may serve any number of
/// `generate` calls.
pub struct BomEngine<'a, S: CatalogStore + ?Sized> {
    store: &'a S,
    policy: SelectionPolicy,
    observer: &'a dyn BomObserver,
}

impl<'a, S: CatalogStore + ?Sized> BomEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            policy: SelectionPolicy::default(),
            observer: &NOOP,
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn BomObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Generate a BOM stamped with the current local time
    pub fn generate(
        &self,
        selected: &[OptionId],
        configuration_name: &str,
    ) -> Result<BomResult, BomError> {
        self.generate_at(selected, configuration_name, Local::now())
    }

    /// Generate a BOM with an explicit timestamp
    pub fn generate_at(
        &self,
        selected: &[OptionId],
        configuration_name: &str,
        generated_at: DateTime<Local>,
    ) -> Result<BomResult, BomError> {
        self.observer
            .generation_started(configuration_name, selected);

        let options = resolve_options(self.store, selected, self.policy, self.observer)?;

        let activations = aggregate_activations(self.store, &options)?;
        self.observer.modules_activated(&activations);

        let consolidation = consolidate_parts(self.store, &activations, self.observer)?;

        let result = assemble_bom(
            self.store,
            configuration_name,
            generated_at,
            &options,
            &consolidation,
            self.observer,
        )?;

        self.observer.generation_finished(&result);
        Ok(result)
    }
}

/// Generate a BOM with the default policy and no observer
pub fn generate_bom<S: CatalogStore + ?Sized>(
    store: &S,
    selected: &[OptionId],
    configuration_name: &str,
) -> Result<BomResult, BomError> {
    BomEngine::new(store).generate(selected, configuration_name)
}

#[cfg(test)]
mod tests;

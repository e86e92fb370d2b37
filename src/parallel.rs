//! Parallel processing support for ferro-interface
//!
//! This module runs independent interaction queries using rayon. Enable with
//! the `parallel` feature.
//!
//! Every query gets its own [`QueryScope`] with its own copies of the
//! genes, so no mapping state is shared between workers.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_interface::parallel::run_queries;
//! use ferro_interface::scope::InteractionQuery;
//! use ferro_interface::MockProvider;
//!
//! let provider = MockProvider::with_test_data();
//! let queries = vec![
//!     InteractionQuery::new("chr1", 1012, 1020, "P11111", "P22222"),
//!     InteractionQuery::new("chr1", 2020, 2041, "P22222", "P11111"),
//! ];
//!
//! let reports = run_queries(&provider, &provider, provider.genes(), &queries);
//! assert_eq!(reports.len(), 2);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::align::{PairwiseAligner, SequenceAligner};
use crate::config::InterfaceConfig;
use crate::error::InterfaceError;
use crate::gene::Gene;
use crate::scope::{InteractionQuery, QueryReport, QueryScope};
use crate::structure::{ProteinProvider, StructureSource};

/// Run multiple queries in parallel with the default aligner
///
/// Returns a vector of results, one for each query.
/// Order is preserved.
pub fn run_queries<S, P>(
    source: &S,
    proteins: &P,
    genes: &[Gene],
    queries: &[InteractionQuery],
) -> Vec<Result<QueryReport, InterfaceError>>
where
    S: StructureSource + Sync + ?Sized,
    P: ProteinProvider + Sync + ?Sized,
{
    run_queries_with_aligner(source, proteins, genes, queries, PairwiseAligner::default())
}

/// Run multiple queries in parallel, scoring as `config` says
///
/// Order is preserved.
pub fn run_queries_with_config<S, P>(
    source: &S,
    proteins: &P,
    genes: &[Gene],
    queries: &[InteractionQuery],
    config: &InterfaceConfig,
) -> Vec<Result<QueryReport, InterfaceError>>
where
    S: StructureSource + Sync + ?Sized,
    P: ProteinProvider + Sync + ?Sized,
{
    queries
        .par_iter()
        .map(|query| {
            let mut scope = QueryScope::with_config(source, proteins, config);
            add_overlapping_genes(&mut scope, genes, query);
            scope.run(query)
        })
        .collect()
}

/// Run multiple queries in parallel, each with a clone of `aligner`
///
/// Order is preserved.
pub fn run_queries_with_aligner<S, P, A>(
    source: &S,
    proteins: &P,
    genes: &[Gene],
    queries: &[InteractionQuery],
    aligner: A,
) -> Vec<Result<QueryReport, InterfaceError>>
where
    S: StructureSource + Sync + ?Sized,
    P: ProteinProvider + Sync + ?Sized,
    A: SequenceAligner + Clone + Sync,
{
    queries
        .par_iter()
        .map(|query| {
            let mut scope = QueryScope::with_aligner(source, proteins, aligner.clone());
            add_overlapping_genes(&mut scope, genes, query);
            scope.run(query)
        })
        .collect()
}

fn add_overlapping_genes<S, P, A>(
    scope: &mut QueryScope<'_, S, P, A>,
    genes: &[Gene],
    query: &InteractionQuery,
) where
    S: StructureSource + ?Sized,
    P: ProteinProvider + ?Sized,
    A: SequenceAligner,
{
    for gene in genes
        .iter()
        .filter(|g| g.overlaps(&query.chromosome, query.start, query.end))
    {
        scope.add_gene(gene.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ResultQuality;
    use crate::structure::MockProvider;

    fn queries() -> Vec<InteractionQuery> {
        vec![
            InteractionQuery::new("chr1", 1012, 1020, "P11111", "P22222"),
            InteractionQuery::new("chr1", 2020, 2041, "P22222", "P11111"),
            InteractionQuery::new("chr1", 1012, 1020, "P11111", "P99999"),
            InteractionQuery::new("chr1", 1115, 1129, "P11111", "P22222"),
        ]
    }

    #[test]
    fn test_run_queries_order_preserved() {
        let provider = MockProvider::with_test_data();
        let reports = run_queries(&provider, &provider, provider.genes(), &queries());
        assert_eq!(reports.len(), 4);

        let first = reports[0].as_ref().unwrap();
        assert_eq!(first.positions_a[0].start(), 5);
        let second = reports[1].as_ref().unwrap();
        assert_eq!(second.positions_a[0].gene_id(), "GENEB");
        assert!(reports[2].is_err());
        let fourth = reports[3].as_ref().unwrap();
        assert_eq!(fourth.quality_a, ResultQuality::HasResidue);
    }

    #[test]
    fn test_run_queries_matches_sequential() {
        let provider = MockProvider::with_test_data();
        let parallel = run_queries(&provider, &provider, provider.genes(), &queries());

        for (query, report) in queries().iter().zip(parallel) {
            let mut scope = QueryScope::new(&provider, &provider);
            for gene in provider.genes() {
                scope.add_gene(gene.clone());
            }
            assert_eq!(scope.run(query).ok(), report.ok());
        }
    }

    #[test]
    fn test_run_queries_with_config() {
        let provider = MockProvider::with_test_data();
        let config = InterfaceConfig::default();
        let reports =
            run_queries_with_config(&provider, &provider, provider.genes(), &queries()[..1], &config);
        assert_eq!(
            reports[0].as_ref().unwrap().quality_a,
            ResultQuality::HasInterface
        );
    }

    #[test]
    fn test_run_queries_empty() {
        let provider = MockProvider::with_test_data();
        assert!(run_queries(&provider, &provider, provider.genes(), &[]).is_empty());
    }
}

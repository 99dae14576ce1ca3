//! Season-chain fallback: walk a work's relation graph back to the
//! installment it continues.

use std::collections::HashSet;

use crate::models::{Relation, RelationKind, TitleRecord};
use crate::traits::SourceCatalog;
use crate::ResolveError;

/// Predecessor hops allowed before giving up on a title.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 8;

/// Find the immediate predecessor of `record`.
///
/// A parent story wins over a prequel. The returned record is fresh and
/// unresolved, so it can be walked further if it fails to resolve too.
pub async fn find_predecessor<S>(source: &S, record: &TitleRecord) -> Result<TitleRecord, ResolveError>
where
    S: SourceCatalog + ?Sized,
{
    let relations = source.relations(record.source_id).await?;
    pick_predecessor(relations).ok_or_else(|| ResolveError::NoPredecessor {
        record: record.to_string(),
    })
}

/// Later edges of the same kind replace earlier ones.
fn pick_predecessor(relations: Vec<Relation>) -> Option<TitleRecord> {
    let mut parent_story = None;
    let mut prequel = None;
    for relation in relations {
        match relation.kind {
            RelationKind::ParentStory => parent_story = Some(relation.record),
            RelationKind::Prequel => prequel = Some(relation.record),
            RelationKind::Other => {}
        }
    }
    parent_story.or(prequel)
}

/// Tracks the source ids visited while walking one title's chain.
#[derive(Debug)]
pub struct ChainGuard {
    visited: HashSet<i64>,
    max_depth: usize,
}

impl ChainGuard {
    pub fn new(max_depth: usize) -> Self {
        Self {
            visited: HashSet::new(),
            max_depth,
        }
    }

    /// Record a step onto `source_id`. The first call is the title itself;
    /// every later call is one predecessor hop.
    pub fn enter(&mut self, source_id: i64) -> Result<(), ResolveError> {
        if !self.visited.insert(source_id) {
            return Err(ResolveError::CycleDetected { source_id });
        }
        if self.depth() > self.max_depth {
            return Err(ResolveError::ChainTooDeep {
                depth: self.max_depth,
            });
        }
        Ok(())
    }

    /// Predecessor hops taken so far.
    pub fn depth(&self) -> usize {
        self.visited.len().saturating_sub(1)
    }
}

impl Default for ChainGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHAIN_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockSource;

    fn work(id: i64, title: &str) -> TitleRecord {
        TitleRecord::new(id, Some(title.to_string()), None, Some(2020))
    }

    fn relation(kind: RelationKind, id: i64) -> Relation {
        Relation {
            kind,
            record: work(id, &format!("work {id}")),
        }
    }

    #[test]
    fn test_parent_story_wins_over_prequel() {
        let picked = pick_predecessor(vec![
            relation(RelationKind::Prequel, 2),
            relation(RelationKind::ParentStory, 3),
            relation(RelationKind::Other, 4),
        ]);
        assert_eq!(picked.map(|r| r.source_id), Some(3));
    }

    #[test]
    fn test_prequel_used_without_parent() {
        let picked = pick_predecessor(vec![
            relation(RelationKind::Other, 4),
            relation(RelationKind::Prequel, 2),
        ]);
        assert_eq!(picked.map(|r| r.source_id), Some(2));
    }

    #[test]
    fn test_last_edge_of_a_kind_wins() {
        let picked = pick_predecessor(vec![
            relation(RelationKind::Prequel, 2),
            relation(RelationKind::Prequel, 5),
        ]);
        assert_eq!(picked.map(|r| r.source_id), Some(5));
    }

    #[tokio::test]
    async fn test_find_predecessor_returns_fresh_record() {
        let source = MockSource::new();
        source.set_relations(
            125367,
            vec![Relation {
                kind: RelationKind::Prequel,
                record: TitleRecord::new(
                    112641,
                    Some("Kaguya-sama: Love is War?".into()),
                    Some("Kaguya-sama wa Kokurasetai?: Tensaitachi no Renai Zunousen".into()),
                    Some(2020),
                ),
            }],
        );

        let record = work(125367, "Kaguya-sama: Love is War -Ultra Romantic-").with_target_id(9);
        let predecessor = find_predecessor(&source, &record).await.unwrap();

        assert_eq!(predecessor.source_id, 112641);
        assert_eq!(predecessor.release_year, Some(2020));
        assert_eq!(predecessor.target_id(), None);
        assert_eq!(source.relation_calls(), vec![125367]);
    }

    #[tokio::test]
    async fn test_no_relations_is_no_predecessor() {
        let source = MockSource::new();
        source.set_relations(1, vec![relation(RelationKind::Other, 2)]);

        let err = find_predecessor(&source, &work(1, "lonely")).await.unwrap_err();
        assert!(matches!(err, ResolveError::NoPredecessor { .. }));
    }

    #[tokio::test]
    #[ignore = "requires network access to AniList"]
    async fn test_live_kaguya_prequel() {
        let client = anilist::AnilistClient::new(reqwest::Client::new());
        let record = work(125367, "Kaguya-sama: Love is War -Ultra Romantic-");

        let predecessor = find_predecessor(&client, &record).await.unwrap();
        assert_eq!(predecessor.source_id, 112641);
    }

    #[test]
    fn test_chain_guard_detects_cycle() {
        let mut guard = ChainGuard::new(8);
        guard.enter(1).unwrap();
        guard.enter(2).unwrap();
        let err = guard.enter(1).unwrap_err();
        assert!(matches!(err, ResolveError::CycleDetected { source_id: 1 }));
    }

    #[test]
    fn test_chain_guard_caps_depth() {
        let mut guard = ChainGuard::new(2);
        guard.enter(10).unwrap();
        guard.enter(11).unwrap();
        guard.enter(12).unwrap();
        assert_eq!(guard.depth(), 2);
        let err = guard.enter(13).unwrap_err();
        assert!(matches!(err, ResolveError::ChainTooDeep { depth: 2 }));
    }
}

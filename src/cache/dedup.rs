//! Collapsing a request batch to one fetch per distinct identifier.

use std::collections::HashMap;

use super::key::LookupId;

/// All requests from one batch that resolve to the same canonical key.
/// `id` is the first spelling seen; `handles` preserve submission order.
#[derive(Debug)]
pub struct RequestGroup<H> {
    pub key: String,
    pub id: LookupId,
    pub handles: Vec<H>,
}

/// Group a batch by canonical cache key, preserving first-seen order of the
/// groups and submission order of handles within each group.
pub fn group_requests<H>(batch: impl IntoIterator<Item = (LookupId, H)>) -> Vec<RequestGroup<H>> {
    let mut groups: Vec<RequestGroup<H>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (id, handle) in batch {
        let key = id.cache_key();
        match index.get(&key) {
            Some(&i) => groups[i].handles.push(handle),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(RequestGroup {
                    key,
                    id,
                    handles: vec![handle],
                });
            }
        }
    }
    groups
}

/// How many fetches grouping saved: batch size minus distinct identifiers.
pub fn duplicates_avoided<H>(groups: &[RequestGroup<H>]) -> u64 {
    groups.iter().map(|g| g.handles.len() as u64 - 1).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosmetic_spellings_collapse_to_one_group() {
        let batch = vec![
            (LookupId::new("388221", "SP"), 0),
            (LookupId::new("0388221", "sp"), 1),
            (LookupId::new(" 388221 ", " SP "), 2),
            (LookupId::new("00388221", "Sp"), 3),
            (LookupId::new("388221", "sp"), 4),
        ];
        let groups = group_requests(batch);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "388221/SP");
        assert_eq!(groups[0].handles, vec![0, 1, 2, 3, 4]);
        assert_eq!(duplicates_avoided(&groups), 4);
    }

    #[test]
    fn distinct_identifiers_keep_insertion_order() {
        let batch = vec![
            (LookupId::new("2", "SP"), "a"),
            (LookupId::new("1", "RJ"), "b"),
            (LookupId::new("02", "sp"), "c"),
            (LookupId::new("3", "MG"), "d"),
        ];
        let groups = group_requests(batch);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, ["2/SP", "1/RJ", "3/MG"]);
        assert_eq!(groups[0].handles, ["a", "c"]);
        assert_eq!(duplicates_avoided(&groups), 1);
    }

    #[test]
    fn empty_batch_gives_no_groups() {
        let groups = group_requests(Vec::<(LookupId, u32)>::new());
        assert!(groups.is_empty());
        assert_eq!(duplicates_avoided(&groups), 0);
    }
}

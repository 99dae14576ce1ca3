use std::collections::HashSet;

use dialoguer::console::Term;
use dialoguer::MultiSelect;
use resolver::TitleRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Selection prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("No shows selected.")]
    Cancelled,
}

/// One line of the selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Choice {
    label: String,
    secondary_id: i64,
    present: bool,
}

/// One line per distinct secondary id; the first record for an id names it.
fn choices(records: &[TitleRecord], existing: &[i64], romaji: bool) -> Vec<Choice> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| {
            let secondary_id = record.secondary_id()?;
            if !seen.insert(secondary_id) {
                return None;
            }
            let present = existing.contains(&secondary_id);
            let title = record.display_title(romaji);
            let label = if present {
                format!("{title} (already in Sonarr)")
            } else {
                title.to_string()
            };
            Some(Choice {
                label,
                secondary_id,
                present,
            })
        })
        .collect()
}

/// Secondary ids behind the picked lines; entries already in the library
/// are never returned.
fn picked(choices: &[Choice], indices: &[usize]) -> Vec<i64> {
    indices
        .iter()
        .filter_map(|&i| choices.get(i))
        .filter(|choice| !choice.present)
        .map(|choice| choice.secondary_id)
        .collect()
}

/// Ask which resolved titles to add. Returns their secondary ids.
pub fn select(
    records: &[TitleRecord],
    existing: &[i64],
    romaji: bool,
) -> Result<Vec<i64>, SelectionError> {
    let choices = choices(records, existing, romaji);
    let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

    let indices = MultiSelect::new()
        .with_prompt("Select anime to add to Sonarr (space to toggle, enter to confirm)")
        .items(&labels)
        .interact_on_opt(&Term::stderr())?
        .ok_or(SelectionError::Cancelled)?;

    Ok(picked(&choices, &indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(source_id: i64, english: Option<&str>, romaji: &str, tvdb: i64) -> TitleRecord {
        TitleRecord::new(
            source_id,
            english.map(str::to_string),
            Some(romaji.to_string()),
            Some(2022),
        )
        .with_target_id(source_id * 10)
        .with_secondary_id(tvdb)
        .unwrap()
    }

    fn records() -> Vec<TitleRecord> {
        vec![
            resolved(1, Some("BOCCHI THE ROCK!"), "Bocchi the Rock!", 420657),
            resolved(2, None, "Oshiri Tantei 5", 1000),
            resolved(3, Some("Spy x Family"), "SPY×FAMILY", 405920),
        ]
    }

    #[test]
    fn test_labels_follow_title_preference() {
        let english: Vec<String> = choices(&records(), &[], false)
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(english, vec!["BOCCHI THE ROCK!", "Oshiri Tantei 5", "Spy x Family"]);

        let romaji: Vec<String> = choices(&records(), &[], true)
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(romaji, vec!["Bocchi the Rock!", "Oshiri Tantei 5", "SPY×FAMILY"]);
    }

    #[test]
    fn test_present_entries_marked_and_skipped() {
        let choices = choices(&records(), &[405920], false);
        assert!(choices[2].present);
        assert_eq!(choices[2].label, "Spy x Family (already in Sonarr)");

        assert_eq!(picked(&choices, &[0, 2]), vec![420657]);
        assert_eq!(picked(&choices, &[1, 0]), vec![1000, 420657]);
    }

    #[test]
    fn test_unresolved_records_not_listed() {
        let partial = TitleRecord::new(9, Some("Half".into()), None, None).with_target_id(90);
        assert!(choices(&[partial], &[], false).is_empty());
    }

    #[test]
    fn test_same_series_listed_once() {
        let mut records = records();
        records.push(resolved(4, Some("Bocchi the Rock! Recap"), "Bocchi Recap", 420657));

        let choices = choices(&records, &[], false);
        let ids: Vec<i64> = choices.iter().map(|c| c.secondary_id).collect();
        assert_eq!(ids, vec![420657, 1000, 405920]);
        assert_eq!(choices[0].label, "BOCCHI THE ROCK!");
    }
}

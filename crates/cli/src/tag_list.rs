use anilist::Vocabulary;
use clap::ValueEnum;

const DESCRIPTION_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TagListStyle {
    /// Plain name lists
    Simple,
    /// Tables with tag categories and descriptions
    Fancy,
}

pub fn render(vocabulary: &Vocabulary, style: TagListStyle) -> String {
    match style {
        TagListStyle::Simple => simple(vocabulary),
        TagListStyle::Fancy => fancy(vocabulary),
    }
}

fn simple(vocabulary: &Vocabulary) -> String {
    let tags: Vec<&str> = vocabulary.tags.iter().map(|t| t.name.as_str()).collect();
    format!(
        "== Genres ==\n{}\n\n== Tags ==\n{}\n",
        vocabulary.genres.join("\n"),
        tags.join("\n")
    )
}

fn fancy(vocabulary: &Vocabulary) -> String {
    let genres = vocabulary
        .genres
        .iter()
        .map(|genre| vec![genre.clone()])
        .collect();
    let tags = vocabulary
        .tags
        .iter()
        .map(|tag| {
            vec![
                tag.name.clone(),
                tag.category.clone().unwrap_or_default(),
                truncate(tag.description.as_deref().unwrap_or_default()),
            ]
        })
        .collect();

    format!(
        "{}\nTag list\n{}",
        table(&["Genres"], genres),
        table(&["Name", "Category", "Description"], tags)
    )
}

fn truncate(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= DESCRIPTION_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(DESCRIPTION_WIDTH - 3).collect();
    short.push_str("...");
    short
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+\n", segments.join("+"))
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut out = rule.clone();
    out.push_str(&line(headers.to_vec()));
    out.push_str(&rule.replace('-', "="));
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out.push_str(&rule);
    out
}

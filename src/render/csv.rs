//! CSV tables for notebooks and discussion threads
//!
//! Fields containing the separator, a quote or a line break are quoted with
//! embedded quotes doubled. Rows end with `\n`.

use crate::models::ScrapeResult;

const SEP: char = ',';

pub const NOTEBOOK_HEADER: [&str; 7] = [
    "id",
    "title",
    "author",
    "votes",
    "language",
    "lastRunTime",
    "url",
];

pub const THREAD_HEADER: [&str; 7] = [
    "id",
    "title",
    "author",
    "replyCount",
    "voteCount",
    "postCount",
    "url",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<S: AsRef<str>>(out: &mut String, row: &[S]) {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            out.push(SEP);
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push('\n');
}

/// One row per notebook, in collection order
pub fn to_csv(result: &ScrapeResult) -> String {
    let mut out = String::new();
    write_row(&mut out, &NOTEBOOK_HEADER);

    for notebook in &result.notebooks {
        write_row(
            &mut out,
            &[
                notebook.id.clone(),
                notebook.title.clone(),
                notebook.author.clone(),
                notebook.votes.to_string(),
                notebook.language.clone().unwrap_or_default(),
                notebook.last_run_time.clone().unwrap_or_default(),
                notebook.url.clone(),
            ],
        );
    }

    out
}

/// One row per discussion thread, in listing order
pub fn threads_to_csv(result: &ScrapeResult) -> String {
    let mut out = String::new();
    write_row(&mut out, &THREAD_HEADER);

    for thread in &result.discussion_threads {
        write_row(
            &mut out,
            &[
                thread.id.clone(),
                thread.title.clone(),
                thread.author.clone(),
                thread.reply_count.to_string(),
                thread.vote_count.to_string(),
                thread.posts.len().to_string(),
                thread.url.clone(),
            ],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Competition, DiscussionThread, Notebook, Post};

    fn result_with(threads: Vec<DiscussionThread>, notebooks: Vec<Notebook>) -> ScrapeResult {
        let competition = Competition {
            id: "titanic".to_string(),
            title: "Should, not appear".to_string(),
            ..Default::default()
        };
        ScrapeResult::new(competition, threads, notebooks)
    }

    #[test]
    fn test_notebook_rows() {
        let result = result_with(
            Vec::new(),
            vec![
                Notebook {
                    id: "alice/eda".to_string(),
                    title: "EDA, \"quick\" look".to_string(),
                    author: "alice".to_string(),
                    votes: 12,
                    url: "https://www.kaggle.com/code/alice/eda".to_string(),
                    language: Some("python".to_string()),
                    last_run_time: None,
                },
                Notebook {
                    id: "bob/base".to_string(),
                    title: "Baseline".to_string(),
                    ..Default::default()
                },
            ],
        );

        let csv = to_csv(&result);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,title,author,votes,language,lastRunTime,url");
        assert_eq!(
            lines[1],
            "alice/eda,\"EDA, \"\"quick\"\" look\",alice,12,python,,https://www.kaggle.com/code/alice/eda"
        );
        assert_eq!(lines[2], "bob/base,Baseline,,0,,,");
        assert!(!csv.contains("Should, not appear"));
    }

    #[test]
    fn test_thread_rows() {
        let result = result_with(
            vec![DiscussionThread {
                id: "42".to_string(),
                title: "Multi\nline".to_string(),
                author: "carol".to_string(),
                reply_count: 3,
                vote_count: -2,
                url: "https://www.kaggle.com/competitions/titanic/discussion/42".to_string(),
                posts: vec![Post::default(), Post::default()],
            }],
            Vec::new(),
        );

        let csv = threads_to_csv(&result);
        assert!(csv.starts_with("id,title,author,replyCount,voteCount,postCount,url\n"));
        assert!(csv.contains("42,\"Multi\nline\",carol,3,-2,2,"));
    }

    #[test]
    fn test_empty_tables_have_headers() {
        let result = result_with(Vec::new(), Vec::new());
        assert_eq!(to_csv(&result).lines().count(), 1);
        assert_eq!(threads_to_csv(&result).lines().count(), 1);
    }
}

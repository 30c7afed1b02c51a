use super::batch::{RowStatus, SummaryRow};
use crate::verdict::device_column_label;

const FOLDER_WIDTH: usize = 35;
const TESTS_WIDTH: usize = 10;
const RULE_WIDTH: usize = 70;
const NO_CSV_FILE: &str = "NO CSV FILE";

/// Fixed-width summary table, one line per row, newline-terminated.
#[must_use]
pub fn render_table(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, "Folders", "Total Test", "Provision Device Number");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for row in rows {
        match row.status {
            RowStatus::MissingResultFile => {
                push_line(&mut out, &row.folder, NO_CSV_FILE, NO_CSV_FILE);
            }
            RowStatus::Evaluated { tests, device } => {
                push_line(
                    &mut out,
                    &row.folder,
                    tests.label(),
                    device_column_label(device),
                );
            }
        }
    }
    out
}

fn push_line(out: &mut String, folder: &str, tests: &str, device: &str) {
    out.push_str(&format!(
        "{:<fw$} | {:<tw$} | {}\n",
        folder,
        tests,
        device,
        fw = FOLDER_WIDTH,
        tw = TESTS_WIDTH
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;

    fn row(folder: &str, status: RowStatus) -> SummaryRow {
        SummaryRow {
            folder: folder.to_string(),
            status,
        }
    }

    #[test]
    fn test_header_and_rule() {
        let table = render_table(&[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines[0],
            "Folders                             | Total Test | Provision Device Number"
        );
        assert_eq!(lines[1], "-".repeat(70));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_row_labels() {
        let table = render_table(&[
            row(
                "Aikri-85X-50LS-16-0001",
                RowStatus::Evaluated {
                    tests: Verdict::Pass,
                    device: Verdict::Pass,
                },
            ),
            row(
                "Aikri-85X-50LS-16-0002",
                RowStatus::Evaluated {
                    tests: Verdict::Fail,
                    device: Verdict::Fail,
                },
            ),
            row("Aikri-85X-50LS-16-0003", RowStatus::MissingResultFile),
        ]);
        let lines: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(
            lines[0],
            "Aikri-85X-50LS-16-0001              | PASS       | Pass"
        );
        assert_eq!(
            lines[1],
            "Aikri-85X-50LS-16-0002              | FAIL       | FAIL"
        );
        assert_eq!(
            lines[2],
            "Aikri-85X-50LS-16-0003              | NO CSV FILE | NO CSV FILE"
        );
    }

    #[test]
    fn test_long_folder_names_are_not_truncated() {
        let name = "Aikri-85X-50LS-16-".to_string() + &"9".repeat(30);
        let table = render_table(&[row(&name, RowStatus::MissingResultFile)]);
        assert!(table.lines().nth(2).unwrap().starts_with(&format!("{name} | ")));
    }
}

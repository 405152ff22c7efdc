//! Fixed-column report lines.

use crate::theme::Theme;
use pestat_parsers::kb_to_gb;
use pestat_pbs::NodeState;
use pestat_state::{AnnotatedNode, JobAnnotation};

/// Width of the node name column. Longer names push the row right.
pub const NAME_WIDTH: usize = 14;

/// Largest job count the jobs column shows before switching to `99+`.
pub const JOB_COUNT_SOFT_MAX: usize = 99;

/// Width of the state column, flag glyph included.
const STATE_WIDTH: usize = 6;

/// Glyph appended to flagged fields.
pub const FLAG_GLYPH: char = '*';

/// Per-run rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Print the owner after each job id
    pub show_users: bool,
}

/// Join pre-formatted fields into a row. `state` and `pressure` arrive
/// padded (and possibly painted) by the caller.
fn row(
    name: &str,
    state: &str,
    cpus: &str,
    jobs: &str,
    mem: &str,
    pressure: &str,
    list: &str,
) -> String {
    let line = format!(
        "{:<width$} {} {:>4} {} {:>5} {}  {}",
        name,
        state,
        cpus,
        jobs,
        mem,
        pressure,
        list,
        width = NAME_WIDTH
    );
    line.trim_end().to_string()
}

/// The three header lines: titles, units, separator.
pub fn header(options: &RenderOptions) -> Vec<String> {
    let list_title = if options.show_users { "jobid user" } else { "jobids" };
    vec![
        row("node", "state ", "cpu", "jobs", "mem", "  mem ", list_title),
        row("", "      ", "", "    ", "GiB", "  used", ""),
        row(
            &"-".repeat(NAME_WIDTH),
            "------",
            "----",
            "----",
            "-----",
            "------",
            "----------",
        ),
    ]
}

fn job_count_text(count: usize) -> String {
    if count > JOB_COUNT_SOFT_MAX {
        format!("{}+", JOB_COUNT_SOFT_MAX)
    } else {
        count.to_string()
    }
}

fn flag_glyph(flagged: bool) -> char {
    if flagged { FLAG_GLYPH } else { ' ' }
}

/// One entry of the job list: the id, followed by the owner when
/// `show_users` is set.
///
/// Orphaned jobs always print `id NONE*`, with or without `show_users`,
/// so a flagged node shows which job caused it even in plain output.
fn render_job(job: &JobAnnotation, theme: &Theme, options: &RenderOptions) -> String {
    let text = if options.show_users || job.is_orphaned() {
        format!("{} {}", job.job_id, job.display_user())
    } else {
        job.job_id.clone()
    };
    theme.paint(&text, theme.job_color(job.severity, job.queue_color))
}

/// Render one annotated node as a report line.
pub fn render_node(node: &AnnotatedNode, theme: &Theme, options: &RenderOptions) -> String {
    let node_state: NodeState = node.state();

    // glyph sits right after the label, padding goes after the glyph
    let label = node_state.label();
    let glyph = if node.flags.state { FLAG_GLYPH.to_string() } else { String::new() };
    let state = format!(
        "{}{}{}",
        theme.paint(label, theme.state_color(node_state)),
        glyph,
        " ".repeat(STATE_WIDTH.saturating_sub(label.len() + glyph.len()))
    );

    let jobs = theme.paint(
        &format!("{:>4}", job_count_text(node.node.job_ids.len())),
        theme.job_count_color(node_state),
    );

    let pressure_color = node.flags.memory_pressure.then_some(theme.alert);
    let pressure = format!(
        "{}{}",
        theme.paint(&format!("{:>4}%", node.mem_pressure_display()), pressure_color),
        flag_glyph(node.flags.memory_pressure)
    );

    let list: Vec<String> = node
        .jobs
        .iter()
        .map(|job| render_job(job, theme, options))
        .collect();

    row(
        node.name(),
        &state,
        &node.node.cpus.to_string(),
        &jobs,
        &kb_to_gb(node.node.mem_total_kb).to_string(),
        &pressure,
        &list.join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pestat_pbs::{JobDirectory, JobRecord, parse_pbsnodes};
    use pestat_state::{QueuePalette, ReconcileContext, reconcile};

    fn annotate(dump: &str, jobs: &[(&str, &str, &str)]) -> Vec<AnnotatedNode> {
        let directory: JobDirectory = jobs
            .iter()
            .map(|(id, user, queue)| JobRecord {
                job_id: id.to_string(),
                user: user.to_string(),
                queue: queue.to_string(),
            })
            .collect();
        let palette = QueuePalette::default();
        let ctx = ReconcileContext {
            directory: &directory,
            palette: &palette,
            target: None,
        };
        reconcile(parse_pbsnodes(dump), &ctx)
    }

    const N1: &str = "\
n1
     state = free
     resources_available.ncpus = 8
     resources_available.mem = 16777216kb
     resources_assigned.mem = 0kb
     jobs = 100.server
";

    const N2: &str = "\
n2
     state = job-exclusive,busy
     resources_available.ncpus = 32
     resources_available.mem = 64gb
     resources_assigned.mem = 48gb
     jobs = 200[1].server 200[2].server
";

    #[test]
    fn test_header_has_three_lines() {
        let lines = header(&RenderOptions::default());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("node"));
        assert!(lines[0].ends_with("jobids"));
        assert!(lines[2].starts_with("--------------"));
    }

    #[test]
    fn test_header_with_users() {
        let lines = header(&RenderOptions { show_users: true });
        assert!(lines[0].ends_with("jobid user"));
    }

    #[test]
    fn test_render_orphaned_singleton() {
        let nodes = annotate(N1, &[]);
        let line = render_node(&nodes[0], &Theme::plain(), &RenderOptions::default());
        assert_eq!(line, "n1             free      8    1    16    0%   100 NONE*");
    }

    #[test]
    fn test_orphan_sentinel_without_show_users() {
        let dump = "n1\n     state = job-busy\n     jobs = 100.server 300.server\n";
        let nodes = annotate(dump, &[("300", "bob", "week")]);
        let line = render_node(&nodes[0], &Theme::plain(), &RenderOptions::default());
        assert!(line.ends_with("100 NONE* 300"));

        let options = RenderOptions { show_users: true };
        let line = render_node(&nodes[0], &Theme::plain(), &options);
        assert!(line.ends_with("100 NONE* 300 bob"));
    }

    #[test]
    fn test_render_busy_with_pressure_flag() {
        let nodes = annotate(N2, &[("200[]", "alice", "day")]);
        let line = render_node(&nodes[0], &Theme::plain(), &RenderOptions::default());
        assert_eq!(line, "n2             busy     32    2    64   75%*  200[1] 200[2]");
    }

    #[test]
    fn test_pressure_column_agrees_with_flag() {
        // 503 / 1001 is just over half
        let over = annotate(
            "n1\n     state = free\n     resources_available.mem = 1000kb\n     \
             resources_assigned.mem = 503kb\n",
            &[],
        );
        assert!(over[0].flags.memory_pressure);
        let line = render_node(&over[0], &Theme::plain(), &RenderOptions::default());
        assert_eq!(line, "n1             free      0    0     0   51%*");

        let under = annotate(
            "n1\n     state = free\n     resources_available.mem = 1000kb\n     \
             resources_assigned.mem = 500kb\n",
            &[],
        );
        assert!(!under[0].flags.memory_pressure);
        let line = render_node(&under[0], &Theme::plain(), &RenderOptions::default());
        assert_eq!(line, "n1             free      0    0     0   50%");
    }

    #[test]
    fn test_render_show_users() {
        let nodes = annotate(N2, &[("200[]", "alice", "day")]);
        let options = RenderOptions { show_users: true };
        let line = render_node(&nodes[0], &Theme::plain(), &options);
        assert!(line.ends_with("200[1] alice 200[2] alice"));
    }

    #[test]
    fn test_render_down_node_glyph() {
        let nodes = annotate("n3\n     state = down\n", &[]);
        let line = render_node(&nodes[0], &Theme::plain(), &RenderOptions::default());
        assert!(line.starts_with("n3             down*     0    0     0"));
    }

    #[test]
    fn test_header_aligns_with_rows() {
        let nodes = annotate(N1, &[]);
        let line = render_node(&nodes[0], &Theme::plain(), &RenderOptions::default());
        let separator = &header(&RenderOptions::default())[2];
        let list_column = separator.rfind(' ').unwrap() + 1;
        assert_eq!(&line[list_column..], "100 NONE*");
    }

    #[test]
    fn test_job_count_overflow() {
        assert_eq!(job_count_text(7), "7");
        assert_eq!(job_count_text(99), "99");
        assert_eq!(job_count_text(100), "99+");
    }

    #[test]
    fn test_colored_row_keeps_text() {
        crossterm::style::force_color_output(true);
        let nodes = annotate(N1, &[]);
        let line = render_node(&nodes[0], &Theme::ansi(), &RenderOptions::default());
        assert!(line.starts_with("n1 "));
        assert!(line.contains("free"));
        assert!(line.contains("100 NONE*"));
        assert!(line.contains('\u{1b}'));
    }
}

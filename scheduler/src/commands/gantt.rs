use std::{fmt::Write, fs, path::PathBuf};

use anyhow::Result;
use jobshop::{schedule, MachineId, Schedule};
use log::info;

use super::load_instance;

// matplotlib's tab20
const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

const WIDTH: f64 = 1200.0;
const LEFT: f64 = 60.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 50.0;
const ROW_HEIGHT: f64 = 32.0;
const AXIS_HEIGHT: f64 = 40.0;
const LEGEND_ROW_HEIGHT: f64 = 22.0;
const LEGEND_COLUMNS: usize = 10;
const TICKS: u64 = 10;

pub fn gantt(input_path: PathBuf, output_path: PathBuf) -> Result<()> {
    let instance = load_instance(&input_path)?;
    let schedule = schedule(&instance);

    let svg = render_svg(&schedule)?;
    fs::write(&output_path, svg)?;

    info!("Wrote gantt chart to: {:?}", output_path);

    Ok(())
}

fn color(job: usize) -> &'static str {
    PALETTE[job % PALETTE.len()]
}

/// One row per machine, one bar per operation that takes time.
pub fn render_svg(schedule: &Schedule) -> Result<String, std::fmt::Error> {
    let machines = schedule.machines();
    let jobs = schedule.jobs();
    let makespan = schedule.makespan();

    let chart_width = WIDTH - LEFT - RIGHT;
    let scale = if makespan == 0 {
        0.0
    } else {
        chart_width / makespan as f64
    };
    let chart_bottom = TOP + machines as f64 * ROW_HEIGHT;
    let legend_rows = (jobs + LEGEND_COLUMNS - 1) / LEGEND_COLUMNS;
    let height = chart_bottom + AXIS_HEIGHT + legend_rows as f64 * LEGEND_ROW_HEIGHT + 10.0;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        svg,
        r#"<text x="{}" y="25" text-anchor="middle" font-size="16">SPT Gantt Chart (Makespan: {makespan})</text>"#,
        WIDTH / 2.0
    )?;

    for machine in MachineId::all(machines) {
        let y = TOP + machine.index() as f64 * ROW_HEIGHT;
        writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="end">{machine}</text>"#,
            LEFT - 8.0,
            y + ROW_HEIGHT / 2.0 + 4.0
        )?;

        for operation in schedule.machine_timeline(machine) {
            if operation.start >= operation.end {
                continue;
            }

            writeln!(
                svg,
                r#"<rect class="operation" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="black"><title>Job {} step {}: [{}, {})</title></rect>"#,
                LEFT + operation.start as f64 * scale,
                y + 3.0,
                operation.duration() as f64 * scale,
                ROW_HEIGHT - 6.0,
                color(operation.job),
                operation.job + 1,
                operation.step + 1,
                operation.start,
                operation.end
            )?;
        }
    }

    writeln!(
        svg,
        r#"<line x1="{LEFT}" y1="{chart_bottom}" x2="{}" y2="{chart_bottom}" stroke="black"/>"#,
        LEFT + chart_width
    )?;

    if makespan > 0 {
        let step = ((makespan + TICKS - 1) / TICKS).max(1);
        for tick in (0..=makespan).step_by(step as usize) {
            writeln!(
                svg,
                r#"<text x="{:.2}" y="{}" text-anchor="middle">{tick}</text>"#,
                LEFT + tick as f64 * scale,
                chart_bottom + 16.0
            )?;
        }
    }
    writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle">Time</text>"#,
        LEFT + chart_width / 2.0,
        chart_bottom + 32.0
    )?;

    for job in 0..jobs {
        let x = LEFT + (job % LEGEND_COLUMNS) as f64 * (chart_width / LEGEND_COLUMNS as f64);
        let y = chart_bottom + AXIS_HEIGHT + (job / LEGEND_COLUMNS) as f64 * LEGEND_ROW_HEIGHT;
        writeln!(
            svg,
            r#"<rect x="{x:.2}" y="{y:.2}" width="18" height="10" fill="{}"/><text x="{:.2}" y="{:.2}">Job {}</text>"#,
            color(job),
            x + 24.0,
            y + 10.0,
            job + 1
        )?;
    }

    writeln!(svg, "</svg>")?;

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use jobshop::{schedule, Instance};

    use super::render_svg;

    #[test]
    fn one_bar_per_timed_operation() {
        let instance = Instance::new(
            3,
            3,
            vec![vec![3, 2, 2], vec![2, 1, 4], vec![4, 3, 0]],
            vec![vec![1, 2, 3], vec![1, 3, 2], vec![2, 1, 3]],
        )
        .unwrap();

        let svg = render_svg(&schedule(&instance)).unwrap();

        // the zero-length operation of job 3 is left out
        assert_eq!(svg.matches(r#"class="operation""#).count(), 8);
        assert!(svg.contains("SPT Gantt Chart (Makespan: 19)"));
        assert!(svg.contains(">M1<") && svg.contains(">M3<"));
        assert!(svg.contains(">Job 3<"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn empty_schedule_renders() {
        let svg = render_svg(&schedule(&Instance::default())).unwrap();

        assert!(svg.contains("SPT Gantt Chart (Makespan: 0)"));
        assert_eq!(svg.matches(r#"class="operation""#).count(), 0);
    }
}

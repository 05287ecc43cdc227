use console::{measure_text_width, Style};

use super::format_rupees;
use crate::error::AdvisorError;
use crate::models::{
    FarmProfile, Priority, Recommendation, ScenarioProjection, Severity, SoilHealth,
    SoilHealthReport, StatusBand, TreatmentPlan, YieldRequest,
};
use crate::scoring::{Assessment, Filter, FilterResult};

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_indent() -> String {
    dim().apply_to(format!("{}   ", TREE_VERT)).to_string()
}

fn tree_blank() -> String {
    "    ".to_string()
}

fn tree_node(last: bool) -> String {
    if last {
        tree_end()
    } else {
        tree_branch()
    }
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.1}", dim().apply_to(sign), value.abs())
}

fn status_style(status: StatusBand) -> Style {
    match status {
        StatusBand::Good => green(),
        StatusBand::High => cyan(),
        StatusBand::Moderate => yellow(),
        StatusBand::Low | StatusBand::NeedsAttention => red(),
    }
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => red().bold(),
        Priority::Medium => yellow(),
        Priority::Low => dim(),
    }
}

fn severity_style(severity: Severity) -> Style {
    priority_style(severity.into())
}

fn health_style(health: SoilHealth) -> Style {
    match health {
        SoilHealth::Excellent | SoilHealth::Good => green().bold(),
        SoilHealth::Fair => yellow().bold(),
        SoilHealth::Poor => red().bold(),
    }
}

/// Appends a depth-2 list under an open branch, or a dim `none`.
fn push_list(lines: &mut Vec<String>, parent_last: bool, items: &[String]) {
    let indent = if parent_last {
        tree_blank()
    } else {
        tree_indent()
    };
    if items.is_empty() {
        lines.push(format!("{}{}{}", indent, tree_end(), dim().apply_to("none")));
        return;
    }
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}{}{}", indent, tree_node(i == items.len() - 1), item));
    }
}

fn header(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to(title)));
}

pub fn log_init(host: &str, port: u16) {
    println!(
        "{} starting agro-advisor on {}...",
        init_prefix(),
        cyan().apply_to(format!("{host}:{port}")),
    );
}

pub fn log_policy(threshold: u8, candidates: usize) {
    println!(
        "{} {} crops in catalogue, viability threshold {}.",
        init_prefix(),
        bold().apply_to(candidates),
        bold().apply_to(threshold),
    );
}

pub fn log_error(err: &AdvisorError) {
    println!(
        "{} {} {}",
        red().apply_to(format!("[{}]", err.kind().to_uppercase())),
        bold().apply_to(err.field()),
        dim().apply_to(err.to_string())
    );
}

fn format_filter(filter: &Filter) -> String {
    match filter {
        Filter::BelowViability { score, threshold } => {
            format!("{} ({} < {})", filter, score, threshold)
        }
    }
}

fn recommendation_lines(lines: &mut Vec<String>, rank: usize, r: &Recommendation) {
    lines.push(String::new());
    lines.push(format!(
        "{} {} {}",
        bold().apply_to(format!("#{rank}")),
        green().bold().apply_to(r.crop),
        dim().apply_to(format!("{}% match, {} risk", r.suitability, r.risk)),
    ));

    let budget = if r.within_budget {
        green().apply_to("within budget")
    } else {
        yellow().apply_to("over budget")
    };
    let margin = if r.margin_substituted {
        format!("{}% {}", r.margin_pct, dim().apply_to("(no revenue)"))
    } else {
        format!("{}%", r.margin_pct)
    };

    lines.push(format!(
        "{}{}{} {}",
        tree_branch(),
        pad_label("investment", 1),
        format_rupees(r.investment),
        budget
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("revenue", 1),
        format_rupees(r.revenue)
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("profit", 1),
        bold().apply_to(format_rupees(r.profit))
    ));
    lines.push(format!("{}{}{}", tree_branch(), pad_label("margin", 1), margin));
    lines.push(format!(
        "{}{}{} t {}",
        tree_branch(),
        pad_label("production", 1),
        r.expected_production_t,
        dim().apply_to(format!("at ₹{}/q", r.market_price_per_quintal))
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("growing period", 1),
        r.growing_period
    ));
    lines.push(format!("{}{}", tree_branch(), pad_label("reasons", 1)));
    push_list(lines, false, &r.reasons);
    lines.push(format!("{}{}", tree_end(), pad_label("tips", 1)));
    let tips: Vec<String> = r.tips.iter().map(|t| dim().apply_to(t).to_string()).collect();
    push_list(lines, true, &tips);
}

pub fn print_recommendations(
    profile: &FarmProfile,
    assessments: &[Assessment],
    ranked: &[Recommendation],
) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {} {} {} soil, {} acres",
        magenta().apply_to(bold().apply_to("[RECOMMENDATIONS]")),
        cyan().apply_to(profile.season),
        profile.soil_health,
        profile.soil_type,
        profile.area_acres
    ));
    lines.push(format!(
        "{}",
        dim().apply_to(format!(
            "budget {}, {} market demand",
            profile.budget, profile.market_demand
        ))
    ));

    if ranked.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", yellow().apply_to("no crop reached the viability threshold")));
    }
    for (i, r) in ranked.iter().enumerate() {
        recommendation_lines(&mut lines, i + 1, r);
    }

    let rejected: Vec<String> = assessments
        .iter()
        .filter_map(|a| match &a.filter {
            FilterResult::Reject(f) => Some(format!(
                "{} {}",
                pad_label(a.recommendation.crop.name(), 2),
                dim().apply_to(format_filter(f))
            )),
            FilterResult::Pass => None,
        })
        .collect();
    if !rejected.is_empty() {
        header(&mut lines, "REJECTED");
        for (i, line) in rejected.iter().enumerate() {
            lines.push(format!("{}{}", tree_node(i == rejected.len() - 1), line));
        }
    }

    println!("{}\n", lines.join("\n"));
}

pub fn print_yield(request: &YieldRequest, projections: &[ScenarioProjection]) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {} on {} acres of {} soil",
        magenta().apply_to(bold().apply_to("[YIELD]")),
        green().bold().apply_to(request.crop),
        request.area_acres,
        request.soil_type
    ));

    for p in projections {
        header(&mut lines, &p.scenario.to_string().to_uppercase());
        lines.push(format!(
            "{}{}{} t/acre",
            tree_branch(),
            pad_label("yield", 1),
            bold().apply_to(p.yield_t_per_acre)
        ));
        lines.push(format!(
            "{}{}{} t",
            tree_branch(),
            pad_label("total production", 1),
            p.total_production_t
        ));
        if let Some(change) = p.change_vs_prior_pct {
            lines.push(format!(
                "{}{}{}%",
                tree_branch(),
                pad_label("vs prior yield", 1),
                format_signed(change)
            ));
        }
        lines.push(format!(
            "{}{}{}",
            tree_branch(),
            pad_label("conditions", 1),
            dim().apply_to(format!("rain {}, {}", p.rainfall, p.fertilizer))
        ));
        lines.push(format!(
            "{}{}{}%",
            tree_end(),
            pad_label("confidence", 1),
            p.confidence_pct
        ));
    }

    println!("{}\n", lines.join("\n"));
}

pub fn print_treatment(plan: &TreatmentPlan) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {} at {}, {} acres of {} soil",
        magenta().apply_to(bold().apply_to("[TREATMENT]")),
        green().bold().apply_to(plan.crop),
        cyan().apply_to(plan.growth_stage),
        plan.field_size_acres,
        plan.soil_type
    ));

    header(&mut lines, "FERTILIZER");
    for (i, dose) in plan.fertilizer.iter().enumerate() {
        let last = i == plan.fertilizer.len() - 1;
        lines.push(format!(
            "{}{}{} kg/acre, {} kg total, {}",
            tree_node(last),
            pad_label(&format!("{} ({})", dose.product, dose.nutrient), 1),
            dose.kg_per_acre,
            dose.total_kg,
            bold().apply_to(format_rupees(dose.cost))
        ));
        let splits: Vec<String> = dose
            .splits
            .iter()
            .map(|s| {
                let tag = if s.catch_up {
                    yellow().apply_to(" catch-up").to_string()
                } else if s.critical {
                    red().apply_to(" critical").to_string()
                } else {
                    String::new()
                };
                format!(
                    "{}{} kg/acre{}",
                    pad_label(&format!("week {} ({})", s.week, s.stage), 2),
                    s.kg_per_acre,
                    tag
                )
            })
            .collect();
        push_list(&mut lines, last, &splits);
    }

    header(&mut lines, "IRRIGATION");
    for (i, event) in plan.irrigation.iter().enumerate() {
        let tag = if event.catch_up {
            yellow().apply_to(" catch-up").to_string()
        } else if event.critical {
            red().apply_to(" critical").to_string()
        } else {
            String::new()
        };
        lines.push(format!(
            "{}{}{} mm, {} x{}, {} m³ each{}",
            tree_node(i == plan.irrigation.len() - 1),
            pad_label(&format!("week {} {}", event.week, event.label), 1),
            event.depth_mm,
            event.frequency(),
            event.applications,
            event.volume_m3_per_application,
            tag
        ));
    }

    header(&mut lines, "SCHEDULE");
    for (i, week) in plan.schedule.iter().enumerate() {
        let last = i == plan.schedule.len() - 1;
        let date = week
            .starts_on
            .map(|d| format!(" {}", dim().apply_to(d.format("%d %b %Y"))))
            .unwrap_or_default();
        lines.push(format!(
            "{}{}{}{}",
            tree_node(last),
            pad_label(&format!("week {}", week.week), 1),
            priority_style(week.priority).apply_to(week.priority),
            date
        ));
        push_list(&mut lines, last, &week.tasks);
    }

    header(&mut lines, "TOTALS");
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("fertilizer cost", 1),
        bold().apply_to(format_rupees(plan.total_fertilizer_cost))
    ));
    lines.push(format!(
        "{}{}{} mm",
        tree_end(),
        pad_label("water", 1),
        plan.total_water_mm
    ));

    println!("{}\n", lines.join("\n"));
}

pub fn print_soil_report(report: &SoilHealthReport) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {} soil scored {} ({})",
        magenta().apply_to(bold().apply_to("[SOIL]")),
        report.soil_type,
        bold().apply_to(report.overall_score),
        health_style(report.category).apply_to(report.category)
    ));

    header(&mut lines, "READINGS");
    for (i, c) in report.classifications.iter().enumerate() {
        let unit = if c.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", c.unit)
        };
        lines.push(format!(
            "{}{}{}{} {} {}",
            tree_node(i == report.classifications.len() - 1),
            pad_label(&c.parameter.to_string(), 1),
            c.value,
            unit,
            status_style(c.status).apply_to(c.status),
            dim().apply_to(format!("[{}-{}] {}", c.ideal.min, c.ideal.max, c.recommendation))
        ));
    }

    header(&mut lines, "DEFICIENCIES");
    let deficiencies: Vec<String> = report
        .deficiencies
        .iter()
        .map(|d| {
            format!(
                "{}{} {}",
                pad_label(&d.parameter.to_string(), 1),
                severity_style(d.severity).apply_to(d.severity),
                dim().apply_to(&d.impact)
            )
        })
        .collect();
    if deficiencies.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    }
    for (i, line) in deficiencies.iter().enumerate() {
        lines.push(format!("{}{}", tree_node(i == deficiencies.len() - 1), line));
    }

    if !report.recommendations.is_empty() {
        header(&mut lines, "ACTIONS");
        for (i, action) in report.recommendations.iter().enumerate() {
            let last = i == report.recommendations.len() - 1;
            lines.push(format!(
                "{}{}{}",
                tree_node(last),
                pad_label(&action.category, 1),
                priority_style(action.priority).apply_to(action.priority)
            ));
            push_list(
                &mut lines,
                last,
                &[
                    action.action.clone(),
                    dim().apply_to(&action.timing).to_string(),
                    green().apply_to(&action.expected_improvement).to_string(),
                ],
            );
        }
    }

    if !report.warnings.is_empty() {
        header(&mut lines, "WARNINGS");
        for (i, warning) in report.warnings.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                tree_node(i == report.warnings.len() - 1),
                yellow().apply_to(warning)
            ));
        }
    }

    header(&mut lines, "SUITABLE CROPS");
    if report.suitable_crops.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    }
    for (i, crop) in report.suitable_crops.iter().enumerate() {
        lines.push(format!(
            "{}{}{}% {}",
            tree_node(i == report.suitable_crops.len() - 1),
            pad_label(crop.crop.name(), 1),
            crop.suitability,
            dim().apply_to(crop.season)
        ));
    }

    println!("{}\n", lines.join("\n"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_label_aligns_values() {
        let label = pad_label("margin", 1);
        assert_eq!(measure_text_width(&label), VALUE_COLUMN - TREE_PREFIX_WIDTH);

        let long = pad_label("a label wider than the value column", 1);
        assert!(long.ends_with(' '));
    }

    #[test]
    fn test_push_list_marks_last_item() {
        let mut lines = Vec::new();
        push_list(&mut lines, true, &["one".to_string(), "two".to_string()]);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(TREE_END));
        assert!(lines[0].contains(TREE_BRANCH));

        let mut empty = Vec::new();
        push_list(&mut empty, false, &[]);
        assert!(empty[0].contains("none"));
    }
}

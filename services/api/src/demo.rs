use crate::infra::{
    parse_stage_spec, InMemoryApplicationRepository, InMemoryNotificationPublisher, StageSpec,
};
use chrono::{Duration, Utc};
use clap::Args;
use rekrut::error::AppError;
use rekrut::workflows::recruitment::applications::{
    ApplicationService, ApplicationTimelineView, CandidateId, JobId, RosterPage, RosterQuery,
    ServiceConfig,
};
use rekrut::workflows::recruitment::import::AtsImporter;
use rekrut::workflows::recruitment::{
    current_stage, is_stage_unlocked, overall_status, timeline, BadgePalette, ConnectorState,
    StageName, StageStatus,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PipelineReportArgs {
    /// Comma-separated statuses in pipeline order, e.g. "Lolos,Tidak Lolos".
    /// Omitted trailing stages read as "Belum".
    #[arg(long, value_parser = parse_stage_spec)]
    pub(crate) statuses: StageSpec,
    /// Use the legacy production badge table instead of the corrected one.
    #[arg(long)]
    pub(crate) legacy_palette: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional legacy ATS CSV export to seed the store before the demo.
    #[arg(long)]
    pub(crate) ats_csv: Option<PathBuf>,
    /// Skip the scripted intake walkthrough and only show seeded data.
    #[arg(long)]
    pub(crate) seed_only: bool,
}

pub(crate) fn run_pipeline_report(args: PipelineReportArgs) -> Result<(), AppError> {
    let PipelineReportArgs {
        statuses: StageSpec(stages),
        legacy_palette,
    } = args;

    let palette = if legacy_palette {
        BadgePalette::legacy()
    } else {
        BadgePalette::standard()
    };

    let badge = overall_status(&stages, &palette);

    println!("Stage Pipeline Report");
    println!("=====================");
    println!("Overall status : {} ({:?})", badge.label, badge.tone);
    println!("Current stage  : {}", current_stage(&stages));

    let unlocked: Vec<&str> = StageName::ordered()
        .into_iter()
        .filter(|name| is_stage_unlocked(*name, &stages))
        .map(StageName::label)
        .collect();
    println!("Unlocked       : {}", unlocked.join(", "));
    println!();

    for view in timeline(&stages) {
        let marker = match view.effective_status {
            StageStatus::Passed => "[x]",
            StageStatus::Failed => "[!]",
            StageStatus::NotStarted => "[ ]",
        };
        println!(
            "  {} {:<15} {}",
            marker,
            view.name.label(),
            view.effective_status.label()
        );
        if let Some(connector) = view.connector {
            let line = match connector {
                ConnectorState::Active => "   |",
                ConnectorState::Inactive => "   .",
            };
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { ats_csv, seed_only } = args;

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let service = ApplicationService::new(
        repository,
        notifier.clone(),
        ServiceConfig::default(),
    );

    if let Some(path) = ats_csv {
        let file = File::open(&path)?;
        let imported = AtsImporter::from_reader(file)?;
        let summary = service.import(imported)?;
        println!(
            "Seeded {} application(s) from {} ({} skipped)",
            summary.imported,
            path.display(),
            summary.skipped
        );
        println!();
    }

    if !seed_only {
        run_walkthrough(&service)?;
    }

    println!("== HR roster ==");
    let page = service.roster(&RosterQuery::default())?;
    render_roster(&page);

    println!();
    println!("== Riwayat lamaran: cand-sari ==");
    for application in service.history(&CandidateId("cand-sari".to_string()))? {
        render_timeline(&application.timeline_view(service.palette()));
    }

    println!();
    println!("{} notification(s) published", notifier.events().len());

    Ok(())
}

fn run_walkthrough(
    service: &ApplicationService<InMemoryApplicationRepository, InMemoryNotificationPublisher>,
) -> Result<(), AppError> {
    let now = Utc::now();

    let budi = service.apply(
        CandidateId("cand-budi".to_string()),
        JobId("job-frontend".to_string()),
        now - Duration::days(6),
    )?;
    let sari_frontend = service.apply(
        CandidateId("cand-sari".to_string()),
        JobId("job-frontend".to_string()),
        now - Duration::days(4),
    )?;
    service.apply(
        CandidateId("cand-sari".to_string()),
        JobId("job-data".to_string()),
        now - Duration::days(1),
    )?;

    // Budi clears the first two checkpoints.
    service.update_stage(&budi.id, StageName::Screening, StageStatus::Passed)?;
    service.update_stage(&budi.id, StageName::Psikotest, StageStatus::Passed)?;

    // Sari is rejected at screening for the frontend role.
    service.update_stage(&sari_frontend.id, StageName::Screening, StageStatus::Failed)?;

    Ok(())
}

fn render_roster(page: &RosterPage) {
    println!(
        "page {}/{} ({} row(s) total)",
        page.page, page.total_pages, page.total_rows
    );
    for row in &page.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                let gate = if cell.unlocked { ' ' } else { '*' };
                format!("{}{}={}", gate, cell.name.label(), cell.status.label())
            })
            .collect();
        println!(
            "  {:<12} {:<14} {:<12} [{}] {}",
            row.candidate_id.0,
            row.job_id.0,
            row.overall_status.label,
            row.ai.label,
            cells.join(" | ")
        );
    }
}

fn render_timeline(view: &ApplicationTimelineView) {
    println!(
        "  {} ({}): {}",
        view.id.0, view.job_id.0, view.overall_status.label
    );
    let mut line = String::from("    ");
    for stage in &view.stages {
        line.push_str(stage.name.label());
        line.push(':');
        line.push_str(stage.effective_status.label());
        match stage.connector {
            Some(ConnectorState::Active) => line.push_str(" ── "),
            Some(ConnectorState::Inactive) => line.push_str(" ·· "),
            None => {}
        }
    }
    println!("{line}");
}

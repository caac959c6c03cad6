use chrono::Local;
use client::StoreClient;
use engine::MonthKey;
use spese::{
    config,
    export,
    reports::{self, MonthReport},
    state::{AppState, Preferences},
    store::Store,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},client={level},engine={level}",
            level = settings.log_level
        ))
        .init();

    let preferences = Preferences::load(&settings.state_path)?;
    let mut state = AppState::new(preferences);

    let client = StoreClient::new(&settings.base_url)?;
    let mut store = Store::new(client);

    let configured = settings.selected_month()?;
    let snapshot = store.snapshot().await?;

    let month = configured
        .or_else(|| reports::month_options(snapshot).into_iter().next())
        .unwrap_or_else(|| MonthKey::from_date(Local::now().date_naive()));
    state.select_month(month);

    let report = reports::month_report(snapshot, month);
    render_report(&report, &state);
    render_trend(&reports::spending_trend(snapshot));

    if let Some(path) = &settings.export_path {
        let data = export::expenses_to_csv_string(&snapshot.expenses)?;
        std::fs::write(path, data)?;
        tracing::info!("exported {} expenses to {path}", snapshot.expenses.len());
    }

    state.preferences.save(&settings.state_path)?;
    Ok(())
}

fn render_report(report: &MonthReport, state: &AppState) {
    println!(
        "{} ({} theme)",
        report.month.label(),
        state.preferences.theme
    );
    println!("  total spent      {}", report.summary.total_spent);
    match report.summary.average_expense {
        Some(average) => println!("  average expense  {average}"),
        None => println!("  average expense  n/a"),
    }
    println!("  expenses         {}", report.summary.expense_count);

    if !report.by_category.is_empty() {
        println!("by category");
        for entry in &report.by_category {
            println!("  {:<16} {}", entry.category, entry.total);
        }
    }

    if !report.budgets.is_empty() {
        println!("budgets");
        for budget in &report.budgets {
            let marker = if budget.is_over_budget { " OVER" } else { "" };
            println!(
                "  {:<16} {} of {} ({:.0}%){marker}",
                budget.category, budget.actual_spent, budget.monthly_limit, budget.percentage_used
            );
        }
    }
}

fn render_trend(trend: &[engine::MonthTotal]) {
    if trend.is_empty() {
        return;
    }
    println!("spending by month");
    for entry in trend {
        println!("  {:<16} {}", entry.label, entry.total);
    }
}

use glowkit_core::storage::Database;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = db.workout_stats()?;
    let recent = db.recent_workouts(10)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "stats": stats,
            "recent": recent,
        }))?
    );
    Ok(())
}

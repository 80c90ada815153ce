use chrono::{Days, Local};
use alert_events::{alerts::Alert, app::AppState};

pub fn add_sample_alerts(app: &mut AppState) {
    let today = Local::now().date_naive();

    let Some(tomorrow) = today.succ_opt() else { return };
    let Some(yesterday) = today.pred_opt() else { return };
    let Some(next_week) = today.checked_add_days(Days::new(5)) else { return };

    let alerts = vec![
        ("Generator load test", Some(today), "09:00", "Jim Fryer", "Facilities", "Planned", "High"),
        ("Fire drill", Some(tomorrow), "14:30", "Dana Ruiz", "Safety", "In Progress", "Critical"),
        ("Badge audit", Some(yesterday), "10:00", "Sam Lee", "Security", "Pending", "Normal"),
        ("Quarterly inventory", Some(next_week), "08:00", "", "Admin", "Planned", "Low"),
        ("Replace lobby signage", None, "", "Pat Chen", "Facilities", "Done", "Normal"),
    ];

    for (i, (title, date, time, owner, category, status, priority)) in alerts.into_iter().enumerate() {
        app.add_alert(Alert {
            id: format!("sample_{}", i),
            title: title.to_string(),
            date: date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            time: time.to_string(),
            owner: owner.to_string(),
            category: category.to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            notes: "Sample alert for offline use".to_string(),
            source: "local".to_string(),
        });
    }
}

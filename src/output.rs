use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;
use vc_account::{CompetitiveSummary, StoreItem, StoreView, Wallet};

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn print_heading(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// `3725` -> `1h 2m`
pub fn format_duration(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn items_table(items: &[StoreItem], currency: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Item", currency]);
    for item in items {
        builder.push_record([item.name.clone(), item.cost.to_string()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

pub fn print_store(store: &StoreView) {
    print_heading(&format!(
        "Daily store (resets in {})",
        format_duration(store.daily_remaining_seconds)
    ));
    println!("{}", items_table(&store.daily, "VP"));

    for bundle in &store.featured {
        print_heading(&format!(
            "Featured: {} for {} VP (ends in {})",
            bundle.name,
            bundle.price,
            format_duration(bundle.remaining_seconds)
        ));
        println!("{}", items_table(&bundle.items, "VP"));
    }

    if !store.night_market.is_empty() {
        print_heading("Night market");
        let mut builder = Builder::default();
        builder.push_record(["Item", "Price", "Discounted", "Off"]);
        for item in &store.night_market {
            builder.push_record([
                item.name.clone(),
                item.base_cost.to_string(),
                item.discount_cost.to_string(),
                format!("{}%", item.discount_percent),
            ]);
        }
        println!("{}", builder.build().with(Style::rounded()));
    }

    if !store.accessories.is_empty() {
        print_heading("Accessories");
        println!("{}", items_table(&store.accessories, "KC"));
    }
}

pub fn print_wallet(wallet: &Wallet) {
    let mut builder = Builder::default();
    builder.push_record(["Currency", "Balance"]);
    builder.push_record(["Valorant Points".to_string(), wallet.valorant_points.to_string()]);
    builder.push_record(["Radianite Points".to_string(), wallet.radianite_points.to_string()]);
    builder.push_record(["Kingdom Credits".to_string(), wallet.kingdom_credits.to_string()]);
    builder.push_record(["Free Agents".to_string(), wallet.free_agents.to_string()]);

    print_heading("Wallet");
    println!("{}", builder.build().with(Style::rounded()));
}

pub fn print_rank(summary: &CompetitiveSummary) {
    print_heading("Competitive");
    println!("{}: {}", "Rank".cyan(), summary.tier_name.bold());
    println!("{}: {}", "Rating".cyan(), summary.ranked_rating);

    if let Some(change) = summary.last_rating_change {
        let change = if change >= 0 {
            format!("+{change}").green()
        } else {
            change.to_string().red()
        };
        println!("{}: {}", "Last match".cyan(), change);
    }

    println!("{}: {}/{}", "Wins".cyan(), summary.wins, summary.games);
    if let Some(rank) = summary.leaderboard_rank {
        println!("{}: #{}", "Leaderboard".cyan(), rank);
    }
}

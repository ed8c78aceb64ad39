// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sublog::{cli, commands, db, utils};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sublog=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_arg = matches.get_one::<String>("db").map(PathBuf::from);
    let db = db::open_or_init(db_arg.as_deref());
    let today = utils::as_of(&matches)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            if let db::StoreState::Failed(cause) = db.state() {
                anyhow::bail!("Local store unavailable: {}", cause);
            }
            let path = match db_arg {
                Some(p) => p,
                None => db::db_path()?,
            };
            println!("Database initialized at {}", path.display());
            println!("Schema version {}", db.schema_version());
        }
        Some(("doctor", _)) => commands::doctor::handle(&db)?,
        Some(("sub", sub)) => commands::subscriptions::handle(&db, sub, today)?,
        Some(("expense", sub)) => commands::expenses::handle(&db, sub, today)?,
        Some(("bnpl", sub)) => commands::bnpl::handle(&db, sub, today)?,
        Some(("goal", sub)) => commands::goals::handle(&db, sub, today)?,
        Some(("wish", sub)) => commands::wishlist::handle(&db, sub)?,
        Some(("accounts", sub)) => commands::accounts::handle(&db, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::dashboard(&db, sub, today)?,
        Some(("upcoming", sub)) => commands::dashboard::upcoming(&db, sub, today)?,
        Some(("calendar", sub)) => commands::dashboard::calendar_view(&db, sub, today)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use crate::error::FinTrackResult;
use crate::models::{Category, CategoryKind};
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (expense first, then income)
    List {
        /// Only show one kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Create a custom category
    Add {
        /// Category name
        name: String,
        /// Category kind (income or expense)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Icon shown next to the name
        #[arg(short, long)]
        icon: Option<String>,
        /// Display color (e.g., "#22c55e")
        #[arg(long)]
        color: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> FinTrackResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { kind } => {
            let kinds = match kind {
                Some(kind) => vec![parse_kind(&kind)?],
                None => vec![CategoryKind::Expense, CategoryKind::Income],
            };

            for kind in kinds {
                let categories = service.list_kind(kind)?;
                println!("{}", format_category_list(kind, &categories));
            }
        }

        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let kind = parse_kind(&kind)?;
            let category = service.create(&name, kind, icon.as_deref(), color.as_deref())?;
            println!("Created category: {} {}", category.icon, category.name);
            println!("  ID:   {}", category.id);
            println!("  Kind: {}", category.kind);
        }

        CategoryCommands::Show { category } => {
            let category = service.require(&category)?;
            println!("Category: {} {}", category.icon, category.name);
            println!("  ID:    {}", category.id);
            println!("  Kind:  {}", category.kind);
            println!("  Color: {}", category.color);
        }
    }

    Ok(())
}

fn parse_kind(kind: &str) -> FinTrackResult<CategoryKind> {
    Ok(kind.parse::<CategoryKind>()?)
}

/// Format one kind's categories as a titled list
pub fn format_category_list(kind: CategoryKind, categories: &[Category]) -> String {
    let title = match kind {
        CategoryKind::Expense => "Expense categories",
        CategoryKind::Income => "Income categories",
    };

    let mut output = format!("{}\n{}\n", title, "-".repeat(40));
    if categories.is_empty() {
        output.push_str("  (none)\n");
    }
    for category in categories {
        output.push_str(&format!("  {} {}\n", category.icon, category.name));
    }
    output
}

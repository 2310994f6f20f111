//! Pizza Admin CLI
//!
//! Command-line front end for the restaurant admin dashboard:
//! - Log in and out (the token persists between runs)
//! - Manage the menu and customer accounts
//! - Browse payment transactions
//! - Show the dashboard, statistics charts and ask the assistant

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use pizza_admin::config::{generate_default_config, Config, LoggingConfig};
use pizza_admin::models::format_phone;
use pizza_admin::views::{MenuFields, PaymentRow};
use pizza_admin::{
    ApiClient, ChartSeries, ChartTab, ChartsView, ChatView, Customer, CustomersView,
    DashboardView, LoginView, MenuCategory, MenuItem, ProductsView, Role, Route, Session,
    SessionStore, SortModel, TokenStorage, TransactionsView, ViewError,
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pizza-admin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin dashboard for a pizza restaurant")]
#[command(long_about = "Pizza Admin manages the menu, customer accounts and payments of a pizza restaurant backend.\nIt also shows sales statistics and can ask the AI assistant for advice.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/pizza-admin/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email
        email: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show session and backend settings
    Status,

    /// Show the dashboard overview
    Dashboard,

    /// Manage menu items
    Menu {
        #[command(subcommand)]
        action: MenuCommand,
    },

    /// Manage customer accounts
    Customers {
        #[command(subcommand)]
        action: CustomerCommand,
    },

    /// List payment transactions
    Payments {
        /// Zero-based page
        #[arg(short, long, default_value = "0")]
        page: u32,
        /// Rows per page (20, 50, 100)
        #[arg(short, long, default_value = "20")]
        size: u32,
        /// Sort as field[:asc|desc], e.g. amount:desc
        #[arg(long)]
        sort: Option<SortModel>,
        /// Server-side search text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show statistics charts
    Charts {
        /// Only this chart (aov, status, users, revenue-by-day, total-revenue, products)
        #[arg(short, long)]
        tab: Option<ChartTab>,
    },

    /// Ask the AI assistant
    Chat {
        /// Question for the assistant
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum MenuCommand {
    /// List pizzas, drinks, sides and salads
    List,

    /// Add a menu item
    Create {
        /// Category (pizza, drink, side, salad)
        category: MenuCategory,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        /// Pizza only
        #[arg(long, default_value = "")]
        size: String,
        /// Pizza only
        #[arg(long, default_value = "")]
        crust: String,
    },

    /// Edit a menu item; unset fields keep their value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        crust: Option<String>,
    },

    /// Delete a menu item
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum CustomerCommand {
    /// List customer accounts
    List,

    /// Create an account with the configured default password
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        dob: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Edit an account; unset fields keep their value
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },

    /// Delete an account
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    init_logging(&config.logging);

    let json = cli.format == "json";
    let client = ApiClient::new(&config.api)?;
    let mut store = SessionStore::restore(TokenStorage::new(config.session.state_path()));

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let mut view = LoginView::new(email, password);
            match view.submit(&client, &mut store).await {
                Ok(route) => {
                    println!("Logged in. Token saved to {:?}", store.storage().path());
                    tracing::debug!(route = %route, "Login redirect");
                    println!("Run `pizza-admin dashboard` for an overview.");
                }
                Err(e) => return Err(failure(view.error(), e)),
            }
        }

        Commands::Logout => {
            store.logout()?;
            println!("Logged out");
        }

        Commands::Status => {
            let session = store.session();
            println!("Pizza Admin v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Backend:    {}", client.base_url());
            println!("Token file: {:?}", store.storage().path());
            println!(
                "Session:    {}",
                if session.is_authenticated() { "logged in" } else { "logged out" }
            );
            println!("Mode:       {}", session.mode);
        }

        Commands::Dashboard => {
            let session = guard(&store, Route::Dashboard)?;
            let mut view = DashboardView::new();
            let loaded = view.load(&client, session).await.map(|_| ());
            if let Err(e) = loaded {
                return Err(failure(view.error(), e));
            }
            let summary = view
                .summary()
                .ok_or_else(|| anyhow!("dashboard did not load"))?;

            if json {
                print_json(&serde_json::json!({
                    "total_revenue": summary.total_revenue,
                    "average_order_value": summary.average_order_value,
                    "total_customers": summary.total_customers,
                    "revenue_trend": summary.revenue_trend,
                }))?;
            } else {
                println!("Total Revenue:       ${:.2}", summary.total_revenue);
                println!("Average Order Value: ${:.2}", summary.average_order_value);
                println!("Total Customers:     {}", summary.total_customers);
                println!("Revenue Trend:       {}", summary.revenue_trend);
                println!();
                print_series(&summary.revenue_by_day);
                println!();
                print_series(&summary.order_status);
                println!();
                println!("Recent Transactions");
                print_payments(&summary.recent_payments);
            }
        }

        Commands::Menu { action } => {
            let session = guard(&store, Route::Products)?;
            run_menu(&client, session, action, json).await?;
        }

        Commands::Customers { action } => {
            let session = guard(&store, Route::Customers)?;
            let view = CustomersView::new(config.session.default_customer_password.clone());
            run_customers(&client, session, view, action, json).await?;
        }

        Commands::Payments {
            page,
            size,
            sort,
            search,
        } => {
            let session = guard(&store, Route::Transactions)?;
            let mut view = TransactionsView::new();
            view.set_page_size(size)?;
            if let Some(search) = search {
                view.set_search_input(search);
                view.apply_search();
            }
            view.set_sort(sort);
            view.set_page(page);

            if let Err(e) = view.refresh(&client, session).await {
                return Err(failure(view.error(), e));
            }

            let rows = view.rows();
            if json {
                print_json(&serde_json::json!({
                    "total": view.total(),
                    "page": view.params().page,
                    "payments": rows.iter().map(|r| serde_json::json!({
                        "id": r.id,
                        "orderId": r.order_id,
                        "requestId": r.request_id,
                        "amount": r.amount,
                        "status": r.status,
                        "createdAt": r.created_at,
                    })).collect::<Vec<_>>(),
                }))?;
            } else {
                print_payments(&rows);
                let pages = view.total().div_ceil(u64::from(view.params().page_size)).max(1);
                println!();
                println!(
                    "Page {} of {} ({} transactions)",
                    view.params().page + 1,
                    pages,
                    view.total()
                );
            }
        }

        Commands::Charts { tab } => {
            let session = guard(&store, Route::Charts)?;
            let mut view = ChartsView::new();
            if view.load(&client, session).await.is_err() {
                for msg in view.errors() {
                    eprintln!("{msg}");
                }
            }

            let tabs: Vec<ChartTab> = match tab {
                Some(tab) => {
                    view.select_tab(tab);
                    vec![view.selected()]
                }
                None => ChartTab::ALL.to_vec(),
            };
            let loaded: Vec<ChartSeries> = tabs.iter().filter_map(|t| view.series(*t)).collect();
            if loaded.is_empty() {
                bail!("No statistics could be loaded");
            }

            if json {
                let out: Vec<_> = loaded
                    .iter()
                    .map(|s| serde_json::json!({ "title": s.title, "labels": s.labels, "values": s.values }))
                    .collect();
                print_json(&out)?;
            } else {
                for series in &loaded {
                    print_series(series);
                    println!();
                }
            }
        }

        Commands::Chat { message } => {
            let session = guard(&store, Route::AskAi)?;
            let mut view = ChatView::new();
            view.input = message.join(" ");
            let result = view.send(&client, session).await;
            if let Some(reply) = view.messages().last() {
                println!("{}", reply.text);
            }
            result?;
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pizza_admin={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Route guard: without a token every screen resolves to login
fn guard(store: &SessionStore, requested: Route) -> anyhow::Result<&Session> {
    match Route::resolve(requested, store.session()) {
        Route::Login => bail!("Not logged in. Run `pizza-admin login <email>` first."),
        _ => Ok(store.session()),
    }
}

/// Prefer the view's banner, which carries the user-facing wording
fn failure(banner: Option<&str>, error: ViewError) -> anyhow::Error {
    match banner {
        Some(msg) => anyhow!("{msg}"),
        None => error.into(),
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn run_menu(
    client: &ApiClient,
    session: &Session,
    action: MenuCommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut view = ProductsView::new();
    if let Err(e) = view.refresh(client, session).await {
        return Err(failure(view.error(), e));
    }

    let result = match action {
        MenuCommand::List => {
            if json {
                print_json(view.items())?;
            } else {
                print_menu(view.items());
            }
            return Ok(());
        }
        MenuCommand::Create {
            category,
            name,
            description,
            price,
            size,
            crust,
        } => {
            view.open_create(category);
            if let Some(draft) = view.create.draft_mut() {
                draft.fields = MenuFields {
                    name,
                    description,
                    base_price: price,
                    size,
                    crust_type: crust,
                };
            }
            view.submit_create(client, session).await
        }
        MenuCommand::Update {
            id,
            name,
            description,
            price,
            size,
            crust,
        } => {
            view.begin_update(&id)?;
            if let Some(update) = view.update.draft_mut() {
                let fields = &mut update.fields;
                merge(&mut fields.name, name);
                merge(&mut fields.description, description);
                merge(&mut fields.base_price, price);
                merge(&mut fields.size, size);
                merge(&mut fields.crust_type, crust);
            }
            view.submit_update(client, session).await
        }
        MenuCommand::Delete { id } => view.delete_listed(client, session, &id).await,
    };

    if let Err(e) = result {
        return Err(failure(view.error(), e));
    }
    println!("Done. {} menu items.", view.items().len());
    Ok(())
}

async fn run_customers(
    client: &ApiClient,
    session: &Session,
    mut view: CustomersView,
    action: CustomerCommand,
    json: bool,
) -> anyhow::Result<()> {
    if let Err(e) = view.refresh(client, session).await {
        return Err(failure(view.error(), e));
    }

    let result = match action {
        CustomerCommand::List => {
            if json {
                print_json(view.customers())?;
            } else {
                print_customers(view.customers());
            }
            return Ok(());
        }
        CustomerCommand::Create {
            username,
            email,
            phone,
            address,
            dob,
            role,
        } => {
            view.open_create();
            if let Some(draft) = view.create.draft_mut() {
                draft.username = username;
                draft.email = email;
                draft.phone = phone;
                draft.address = address;
                draft.date_of_birth = dob;
                draft.role = role;
            }
            view.submit_create(client, session).await
        }
        CustomerCommand::Update {
            id,
            username,
            email,
            phone,
            address,
            dob,
            role,
        } => {
            view.begin_update(&id)?;
            if let Some((_, draft)) = view.update.draft_mut() {
                merge(&mut draft.username, username);
                merge(&mut draft.email, email);
                merge(&mut draft.phone, phone);
                merge(&mut draft.address, address);
                merge(&mut draft.date_of_birth, dob);
                if let Some(role) = role {
                    draft.role = role;
                }
            }
            view.submit_update(client, session).await
        }
        CustomerCommand::Delete { id } => view.delete(client, session, &id).await,
    };

    if let Err(e) = result {
        return Err(failure(view.error(), e));
    }
    println!("Done. {} users.", view.customers().len());
    Ok(())
}

fn merge(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_menu(items: &[MenuItem]) {
    if items.is_empty() {
        println!("No menu items yet.");
        println!();
        println!("Add one with:");
        println!("  pizza-admin menu create pizza --name Margherita --description Classic --price 9.5");
        return;
    }

    println!("{:<24} {:<16} {:>8}  {:<26} {}", "Name", "Type", "Price", "ID", "Description");
    println!("{}", "-".repeat(100));
    for item in items {
        println!(
            "{:<24} {:<16} {:>8}  {:<26} {}",
            truncate(&item.name, 24),
            item.kind_label(),
            format!("${:.2}", item.base_price),
            item.id,
            truncate(&item.description, 40)
        );
    }
}

fn print_customers(customers: &[Customer]) {
    if customers.is_empty() {
        println!("No users.");
        return;
    }

    println!("{:<18} {:<28} {:<16} {:<6} {:<26} {}", "Username", "Email", "Phone", "Role", "ID", "Address");
    println!("{}", "-".repeat(110));
    for c in customers {
        println!(
            "{:<18} {:<28} {:<16} {:<6} {:<26} {}",
            truncate(&c.username, 18),
            truncate(&c.email, 28),
            c.phone.as_deref().map(format_phone).unwrap_or_else(|| "-".into()),
            c.role.to_string(),
            c.id,
            c.address.as_deref().unwrap_or("-")
        );
    }
}

fn print_payments(rows: &[PaymentRow]) {
    if rows.is_empty() {
        println!("No transactions");
        return;
    }

    println!("{:<26} {:<16} {:<16} {:>10}  {:<9} {}", "ID", "Order", "Request", "Amount", "Status", "Created");
    println!("{}", "-".repeat(104));
    for row in rows {
        println!(
            "{:<26} {:<16} {:<16} {:>10}  {:<9} {}",
            row.id,
            truncate(&row.order_id, 16),
            truncate(&row.request_id, 16),
            row.amount,
            row.status,
            row.created_at
        );
    }
}

fn print_series(series: &ChartSeries) {
    println!("{}", series.title);
    if series.is_empty() {
        println!("  No data");
        return;
    }

    let max = series.max();
    let width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).min(24);
    for (label, value) in series.labels.iter().zip(&series.values) {
        let bar = if max > 0.0 { ((value / max) * 40.0).round() as usize } else { 0 };
        println!(
            "  {:<width$} | {:<40} {:.2}",
            truncate(label, width),
            "#".repeat(bar),
            value,
            width = width
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}~")
    }
}

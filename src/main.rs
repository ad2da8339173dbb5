//! `dashboard`: the order, menu, user and payment views from the command line.

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, Instrument};

use delivery_dashboard::api::{HttpTransport, Session};
use delivery_dashboard::app_system::{setup_tracing, Config, ConfigError, DashboardSystem, PaginationConfig, SystemError};
use delivery_dashboard::clients::{save_report, AccountClient, ReportKind};
use delivery_dashboard::controls::{ControlError, StatusTransitionControl, TracingNotifier};
use delivery_dashboard::domain::{menu, DateRange, DeliveryDriver, OrderStatus, SignInRequest};
use delivery_dashboard::error::{
    AccountError, ApiError, DeliveryError, MenuError, OrderError, PaymentError, ReportError, RestaurantError,
    UserError,
};
use delivery_dashboard::views::{
    Availability, CategoryCounts, CategoryCriteria, ListView, MenuCounts, MenuItemCriteria, OrderBoard, OrderDetail,
    OrderTab, PaymentCounts, PaymentCriteria, SortDirection, UserCounts, UserCriteria,
};
use delivery_dashboard::workflow::{StatusTimeline, StepState};

/// Command-line arguments for the dashboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Bearer token from `dashboard signin`
    #[arg(long, env = "DASHBOARD_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the session token
    Signin {
        username: String,
        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List a restaurant's or a customer's orders
    #[command(group(ArgGroup::new("owner").required(true).args(["restaurant", "user"])))]
    Orders {
        #[arg(long)]
        restaurant: Option<String>,
        #[arg(long)]
        user: Option<String>,
        /// all, active, completed, cancelled, or a status such as PREPARING
        #[arg(long, default_value = "all")]
        tab: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        oldest_first: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one order with its timeline and the statuses it can move to
    Order { id: String },
    /// Move an order to a new status
    SetStatus { id: String, status: String },
    /// List users
    Users {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List a restaurant's menu items
    Menu {
        restaurant: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = AvailabilityArg::All)]
        availability: AvailabilityArg,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List a restaurant's menu categories, optionally saving a new order
    Categories {
        restaurant: String,
        /// Comma-separated category ids in their new order
        #[arg(long, value_delimiter = ',')]
        reorder: Vec<String>,
    },
    /// List payments
    Payments {
        #[arg(long, value_enum, default_value_t = PaymentScope::All)]
        scope: PaymentScope,
        /// First day for `--scope range` (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day for `--scope range` (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Customer email for `--scope customer`
        #[arg(long)]
        customer: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Download a PDF report
    Report {
        /// Directory the PDF is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[command(subcommand)]
        kind: ReportArg,
    },
    /// List restaurants
    Restaurants {
        /// Only the restaurants you own or administer
        #[arg(long)]
        mine: bool,
    },
    /// Delivery views
    Driver {
        #[command(subcommand)]
        view: DriverView,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AvailabilityArg {
    All,
    Available,
    Unavailable,
}

impl From<AvailabilityArg> for Availability {
    fn from(arg: AvailabilityArg) -> Self {
        match arg {
            AvailabilityArg::All => Availability::All,
            AvailabilityArg::Available => Availability::Available,
            AvailabilityArg::Unavailable => Availability::Unavailable,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PaymentScope {
    All,
    Failed,
    Range,
    Customer,
}

#[derive(Subcommand, Debug)]
enum ReportArg {
    /// Payments for one order
    Order { id: String },
    /// Payments by one customer
    Customer { email: String },
    /// Payments between two dates
    Range { start: NaiveDate, end: NaiveDate },
    /// Payments with a status (`success` is accepted for `succeeded`)
    Status { status: String },
    /// One user's report
    User { id: String },
    /// Users holding a role
    Role { role: String },
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Order { id } => ReportKind::PaymentsForOrder(id),
            ReportArg::Customer { email } => ReportKind::PaymentsForCustomer(email),
            ReportArg::Range { start, end } => ReportKind::PaymentsInRange(DateRange::new(start, end)),
            ReportArg::Status { status } => ReportKind::PaymentsByStatus(status),
            ReportArg::User { id } => ReportKind::User(id),
            ReportArg::Role { role } => ReportKind::Role(role),
        }
    }
}

#[derive(Subcommand, Debug)]
enum DriverView {
    /// Every order handed to a driver
    Replication,
    /// Orders assigned to one driver
    Orders { driver_id: String },
    /// Register a driver
    Register {
        driver_id: String,
        name: String,
        #[arg(long, default_value = "bike")]
        vehicle_type: String,
        #[arg(long)]
        vehicle_number: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Every registered driver
    List,
    /// Delete a driver
    Remove { driver_id: String },
    /// A customer's latest position for an order
    Location { user_id: String, order_id: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Control(#[from] ControlError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Restaurant(#[from] RestaurantError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    System(#[from] SystemError),
    #[error("No session token; pass --token or set DASHBOARD_TOKEN")]
    MissingToken,
    #[error("{0}")]
    Usage(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).await;
    let level = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|config| config.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    setup_tracing(&level);

    let result = match config {
        Ok(config) => run(args, config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: Config) -> Result<(), CliError> {
    let command = match args.command {
        Command::Signin { username, password } => return sign_in(&config, username, password).await,
        command => command,
    };

    let token = args
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or(CliError::MissingToken)?;
    let system = DashboardSystem::connect(&config.api, &Session::from_token(token))?;

    let span = tracing::info_span!("command");
    let result = execute(&system, &config.pagination, command).instrument(span).await;

    system.shutdown().await?;
    result
}

async fn sign_in(config: &Config, username: String, password: String) -> Result<(), CliError> {
    let transport = HttpTransport::new(&config.api)?;
    let account = AccountClient::new(Arc::new(transport));
    let session = account.sign_in(SignInRequest { username, password }).await?;
    info!(username = ?session.username, roles = ?session.roles, "Signed in");
    println!("{}", session.token.expose_secret());
    Ok(())
}

async fn execute(system: &DashboardSystem, pagination: &PaginationConfig, command: Command) -> Result<(), CliError> {
    match command {
        Command::Signin { .. } => Err(CliError::Usage("signin does not take a session".into())),
        Command::Orders { restaurant, user, tab, search, oldest_first, page } => {
            let orders = match (restaurant, user) {
                (Some(restaurant_id), _) => system.order_client.orders_for_restaurant(restaurant_id).await?,
                (None, Some(user_id)) => system.order_client.orders_for_user(user_id).await?,
                (None, None) => return Err(CliError::Usage("pass --restaurant or --user".into())),
            };
            let mut board = OrderBoard::new(orders, pagination.orders);
            board.update_criteria(|criteria| {
                criteria.tab = OrderTab::from(tab.as_str());
                criteria.search = search;
                if oldest_first {
                    criteria.sort = SortDirection::Ascending;
                }
            });
            board.set_page(page.saturating_sub(1));

            let counts = board.counts();
            println!("{} orders, {} active, {} completed", counts.total, counts.active, counts.completed);
            for order in board.list().current_page() {
                let placed = order.created_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default();
                println!("{:<26} {:<18} {:>9.2}  {}", order.id, order.status.label(), order.total, placed);
            }
            print_page_footer(board.list().page(), board.list().page_count());
            Ok(())
        }
        Command::Order { id } => {
            let order = system.order_client.fetch_order(id).await?;
            print_order_detail(&OrderDetail::for_order(order));
            Ok(())
        }
        Command::SetStatus { id, status } => {
            let order = system.order_client.fetch_order(id).await?;
            let control = StatusTransitionControl::new(&order, system.order_client.clone(), Arc::new(TracingNotifier));
            let change = control.select(OrderStatus::from(status.to_ascii_uppercase())).await?;
            println!("{} is now {}", change.order_id, change.status.label());
            Ok(())
        }
        Command::Users { search, role, page } => {
            let users = system.user_client.list_users().await?;
            let counts = UserCounts::of(&users);
            let mut view = ListView::new(users, UserCriteria { search, role }, pagination.users);
            view.set_page(page.saturating_sub(1));

            println!("{} users, {} enabled, {} disabled", counts.total, counts.enabled, counts.disabled);
            for user in view.current_page() {
                let roles: Vec<&str> = user.role_names().collect();
                println!(
                    "{:<12} {:<20} {:<28} {}",
                    user.id,
                    user.display_name(),
                    user.email.as_deref().unwrap_or("-"),
                    roles.join(",")
                );
            }
            print_page_footer(view.page(), view.page_count());
            Ok(())
        }
        Command::Menu { restaurant, search, category, availability, page } => {
            let items = system.menu_item_client.items_for_restaurant(restaurant).await?;
            let counts = MenuCounts::of(&items);
            let criteria = MenuItemCriteria { search, category_id: category, availability: availability.into() };
            let mut view = ListView::new(items, criteria, pagination.menu_items);
            view.set_page(page.saturating_sub(1));

            println!("{} items, {} available", counts.total, counts.available);
            for item in view.current_page() {
                let flag = if item.available { "" } else { " (unavailable)" };
                println!("{:<12} {:<30} {:>8.2}{}", item.id, item.name, item.price, flag);
            }
            print_page_footer(view.page(), view.page_count());
            Ok(())
        }
        Command::Categories { restaurant, reorder } => {
            let mut categories = system.menu_category_client.categories_for_restaurant(restaurant.clone()).await?;
            if !reorder.is_empty() {
                let mut arranged = menu::arrange(&categories, &reorder)?;
                system
                    .menu_category_client
                    .reorder_categories(restaurant, &mut arranged)
                    .await?;
                categories = arranged;
            }

            let counts = CategoryCounts::of(&categories);
            let view = ListView::new(categories, CategoryCriteria::default(), pagination.categories);
            println!("{} categories, {} active", counts.total, counts.active);
            for category in view.filtered() {
                let flag = if category.active { "" } else { " (inactive)" };
                println!("{:>3}. {:<12} {}{}", category.display_order, category.id, category.name, flag);
            }
            Ok(())
        }
        Command::Payments { scope, from, to, customer, search, page } => {
            let payments = match scope {
                PaymentScope::All => system.payment_client.all_payments().await?,
                PaymentScope::Failed => system.payment_client.failed_payments().await?,
                PaymentScope::Range => {
                    let (Some(start), Some(end)) = (from, to) else {
                        return Err(CliError::Usage("--scope range needs --from and --to".into()));
                    };
                    system.payment_client.payments_in_range(DateRange::new(start, end)).await?
                }
                PaymentScope::Customer => {
                    let email = customer.ok_or_else(|| CliError::Usage("--scope customer needs --customer".into()))?;
                    system.payment_client.payments_for_customer(email).await?
                }
            };
            let counts = PaymentCounts::of(&payments);
            let mut view = ListView::new(payments, PaymentCriteria { search }, pagination.payments);
            view.set_page(page.saturating_sub(1));

            println!("{} payments, {} succeeded, {} failed", counts.total, counts.succeeded, counts.failed);
            for payment in view.current_page() {
                println!(
                    "{:<26} {:<28} {:>9.2} {:<4} {}",
                    payment.order_id,
                    payment.customer_email.as_deref().unwrap_or("-"),
                    payment.amount,
                    payment.currency.as_deref().unwrap_or(""),
                    payment.payment_status
                );
            }
            print_page_footer(view.page(), view.page_count());
            Ok(())
        }
        Command::Report { out, kind } => {
            let kind = ReportKind::from(kind);
            let bytes = system.report_client.download(kind.clone()).await?;
            let path = save_report(&bytes, &out, &kind.file_name()).await?;
            println!("Saved {}", path.display());
            Ok(())
        }
        Command::Restaurants { mine } => {
            let restaurants = if mine {
                system.restaurant_client.my_restaurants().await?
            } else {
                system.restaurant_client.all_restaurants().await?
            };
            for restaurant in &restaurants {
                let flag = if restaurant.enabled { "" } else { " (disabled)" };
                println!(
                    "{:<26} {:<30} {:<12} {}{}",
                    restaurant.id,
                    restaurant.name,
                    restaurant.rating_label(),
                    restaurant.address.as_deref().unwrap_or("-"),
                    flag
                );
            }
            Ok(())
        }
        Command::Driver { view } => match view {
            DriverView::Replication => {
                for assignment in system.delivery_client.replication().await? {
                    println!(
                        "{:<26} driver {:<12} {}",
                        assignment.order_id,
                        assignment.driver_id.as_deref().unwrap_or("-"),
                        assignment.status.as_deref().unwrap_or("-")
                    );
                }
                Ok(())
            }
            DriverView::Orders { driver_id } => {
                for assignment in system.delivery_client.driver_orders(driver_id).await? {
                    println!(
                        "{:<26} {}",
                        assignment.order_id,
                        assignment.delivery_address.as_deref().unwrap_or("-")
                    );
                }
                Ok(())
            }
            DriverView::Register { driver_id, name, vehicle_type, vehicle_number, phone, city } => {
                let driver = DeliveryDriver {
                    driver_id,
                    driver_name: name,
                    driver_address: None,
                    driver_phone: phone,
                    vehicle_type,
                    vehicle_number,
                    working_city: city,
                };
                let message = system.delivery_client.register_driver(&driver).await?;
                println!("{}", message.unwrap_or_else(|| "Driver registered".to_string()));
                Ok(())
            }
            DriverView::List => {
                for driver in system.delivery_client.list_drivers().await? {
                    println!(
                        "{:<12} {:<24} {:<8} {:<10} {}",
                        driver.driver_id,
                        driver.driver_name,
                        driver.vehicle_type,
                        driver.vehicle_number.as_deref().unwrap_or("-"),
                        driver.working_city.as_deref().unwrap_or("-")
                    );
                }
                Ok(())
            }
            DriverView::Remove { driver_id } => {
                let message = system.delivery_client.remove_driver(driver_id.clone()).await?;
                println!("{}", message.unwrap_or_else(|| format!("Driver {} deleted", driver_id)));
                Ok(())
            }
            DriverView::Location { user_id, order_id } => {
                let position = system.delivery_client.latest_location(user_id, order_id).await?;
                println!("{:.6},{:.6}", position.lat, position.lng);
                Ok(())
            }
        },
    }
}

fn print_order_detail(detail: &OrderDetail) {
    let order = &detail.order;
    println!("Order {}  [{}]", order.id, order.status.label());
    if let Some(restaurant) = &order.restaurant {
        println!("Restaurant: {}", restaurant.name);
    }
    if let Some(contact) = &order.contact_info {
        println!("Customer:   {} {}", contact.name, contact.phone);
    }
    if let Some(address) = order.address_line() {
        println!("Address:    {}", address);
    }
    println!("Items:      {}  Total: {:.2}", order.item_count(), order.total);

    match &detail.timeline {
        StatusTimeline::Cancelled { message } => println!("\n{}", message),
        StatusTimeline::Steps(steps) => {
            println!();
            for step in steps {
                let marker = match step.state {
                    StepState::Completed => "[x]",
                    StepState::Current => "[>]",
                    StepState::Upcoming => "[ ]",
                };
                println!("{} {}", marker, step.label);
            }
        }
    }

    if detail.actions.is_empty() {
        return;
    }
    let labels: Vec<String> = detail
        .actions
        .iter()
        .map(|action| {
            if action.destructive {
                format!("{} (!)", action.label)
            } else {
                action.label.clone()
            }
        })
        .collect();
    println!("\nNext: {}", labels.join(" | "));
}

fn print_page_footer(page: usize, page_count: usize) {
    if page_count > 1 {
        println!("page {}/{}", page + 1, page_count);
    }
}

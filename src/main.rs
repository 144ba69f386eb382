// src/main.rs - Command line front end

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Map, Value};

use storefront_admin::config::ConfigManager;
use storefront_admin::error::{Error, Result};
use storefront_admin::forms::{
    BannerForm, CategoryForm, ImageRef, ImportForm, LocalImage, ProfitMarginForm, ScrapeForm,
};
use storefront_admin::logging::{LogLevel, LoggingManager};
use storefront_admin::models::{OrderStatus, Product, TrackingRecord};
use storefront_admin::notify::Notifier;
use storefront_admin::platform::NativeNetwork;
use storefront_admin::screens::{
    BannersScreen, BestProductsScreen, BlogScreen, CategoriesScreen, DashboardScreen, OrdersScreen,
    ProductEditorScreen, ProductsScreen, ScreenContext, SettingsScreen, TrackingScreen,
};
use storefront_admin::types::EntityId;
use storefront_admin::views::ProductFilter;
use storefront_admin::workflow::{can_delete, next_action};
use storefront_admin::ApiClient;

#[derive(Parser)]
#[command(
    name = "storefront-admin",
    version = storefront_admin::VERSION,
    about = "Administer products, orders and content of the storefront backend",
    long_about = None
)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides api.base_url
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Overrides api.image_server_url
    #[arg(long, value_name = "URL")]
    image_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show store totals
    Dashboard,
    #[command(subcommand)]
    Products(ProductCommands),
    #[command(subcommand)]
    Categories(CategoryCommands),
    #[command(subcommand)]
    Orders(OrderCommands),
    #[command(subcommand)]
    Tracking(TrackingCommands),
    #[command(subcommand)]
    Banners(BannerCommands),
    #[command(subcommand)]
    Blog(BlogCommands),
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Curate the home page "best products" shelf
    #[command(subcommand)]
    Best(BestCommands),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Args)]
struct FilterArgs {
    /// Matches name or details, case-insensitive
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "")]
    min_price: String,
    #[arg(long, default_value = "")]
    max_price: String,
}

#[derive(Subcommand)]
enum ProductCommands {
    List(FilterArgs),
    Show { id: EntityId },
    /// Import a product from a marketplace URL
    Import {
        url: String,
        #[arg(long)]
        category: EntityId,
    },
    /// Start the bulk re-scrape job on the backend
    Scrape,
    Delete { id: EntityId },
}

#[derive(Subcommand)]
enum CategoryCommands {
    List,
    Create {
        name: String,
        /// Logo file name under the logo directory of the image server
        #[arg(long, default_value = "")]
        logo: String,
    },
    Delete { id: EntityId },
}

#[derive(Subcommand)]
enum OrderCommands {
    List {
        #[arg(long, default_value = "PENDING")]
        status: OrderStatus,
    },
    /// Apply the next workflow step to an order
    Advance {
        id: EntityId,
        /// Status tab to list before and after the change
        #[arg(long, default_value = "PENDING")]
        status: OrderStatus,
        #[arg(long)]
        note: Option<String>,
    },
    Delete {
        id: EntityId,
        #[arg(long, default_value = "PENDING")]
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum TrackingCommands {
    Lookup { order_id: String },
    /// Refresh carrier data, then show it
    Update { order_id: String },
    Scrape {
        tracking_number: String,
        order_id: String,
    },
}

#[derive(Subcommand)]
enum BannerCommands {
    List,
    Create {
        title: String,
        description: String,
        #[arg(long)]
        image: PathBuf,
        #[arg(long, default_value = "")]
        link_url: String,
        #[arg(long, default_value = "")]
        link_name: String,
    },
    Delete { id: EntityId },
}

#[derive(Subcommand)]
enum BlogCommands {
    List,
    Delete { id: EntityId },
}

#[derive(Subcommand)]
enum SettingsCommands {
    Get,
    SetMargin { percentage: String },
}

#[derive(Subcommand)]
enum BestCommands {
    List,
    Add { product_id: EntityId },
    Remove { product_id: EntityId },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let notifier = Notifier::new();
    let mut notifications = notifier.subscribe();

    if let Err(e) = run(cli, notifier).await {
        // the screen's operator-facing message when there is one
        let mut message = e.message.clone();
        while let Ok(notification) = notifications.try_recv() {
            if notification.is_error() {
                message = notification.message;
            }
        }
        eprintln!("Error: {}", message);
        for field in field_errors(&e) {
            eprintln!("  - {}", field);
        }
        process::exit(1);
    }
}

async fn run(cli: Cli, notifier: Notifier) -> Result<()> {
    let mut config_manager = ConfigManager::standard(cli.config.as_deref())?;
    config_manager.add_overrides(overrides(&cli));
    config_manager.initialize().await?;

    let admin_config = config_manager.get_config().await?;
    let mut logging = LoggingManager::new(admin_config.logging.clone());
    if cli.debug {
        logging = logging.with_level(LogLevel::Debug);
    } else if cli.verbose {
        logging = logging.with_level(LogLevel::Info);
    }
    logging.initialize()?;

    if let Commands::ValidateConfig = cli.command {
        return validate_config(&config_manager).await;
    }

    let client_config = config_manager.client_config().await?.shared();
    let network = NativeNetwork::new(client_config.request_timeout())?;
    let client = ApiClient::new(client_config, Arc::new(network));
    let ctx = ScreenContext::new(client, notifier);

    tracing::info!(version = storefront_admin::VERSION, "storefront-admin starting");

    match cli.command {
        Commands::Dashboard => dashboard(ctx).await,
        Commands::Products(command) => products(ctx, command).await,
        Commands::Categories(command) => categories(ctx, command).await,
        Commands::Orders(command) => orders(ctx, command).await,
        Commands::Tracking(command) => tracking(ctx, command).await,
        Commands::Banners(command) => banners(ctx, command).await,
        Commands::Blog(command) => blog(ctx, command).await,
        Commands::Settings(command) => settings(ctx, command).await,
        Commands::Best(command) => best(ctx, command).await,
        Commands::ValidateConfig => Ok(()),
    }
}

fn overrides(cli: &Cli) -> Value {
    let mut api = Map::new();
    if let Some(url) = &cli.api_url {
        api.insert("base_url".to_string(), json!(url));
    }
    if let Some(url) = &cli.image_url {
        api.insert("image_server_url".to_string(), json!(url));
    }
    if api.is_empty() {
        json!({})
    } else {
        json!({ "api": api })
    }
}

fn field_errors(error: &Error) -> Vec<String> {
    match &error.kind {
        storefront_admin::ErrorKind::Validation { rules, .. } if rules.len() > 1 => rules.clone(),
        _ => Vec::new(),
    }
}

async fn validate_config(manager: &ConfigManager) -> Result<()> {
    let errors = manager.validate().await?;
    if errors.is_empty() {
        println!("✅ Configuration is valid");
        let merged = serde_json::to_string_pretty(&manager.debug_config().await)?;
        println!("{}", merged);
        return Ok(());
    }

    println!("❌ Configuration validation failed:");
    for error in &errors {
        println!("  - {}", error);
    }
    Err(Error::config(format!("{} configuration error(s)", errors.len())))
}

async fn dashboard(ctx: ScreenContext) -> Result<()> {
    let screen = DashboardScreen::new(ctx);
    let stats = screen.load().await?;

    println!("Storefront Dashboard");
    println!("====================");
    println!("Products:        {}", stats.products_count);
    println!("Orders:          {}", stats.orders_count);
    println!("Pending orders:  {}", stats.pending_orders);
    println!("Revenue (paid):  ${}", stats.formatted_revenue());
    Ok(())
}

async fn products(ctx: ScreenContext, command: ProductCommands) -> Result<()> {
    match command {
        ProductCommands::List(filter) => {
            let screen = ProductsScreen::new(ctx);
            screen.load().await?;
            screen
                .set_filter(ProductFilter::from_inputs(
                    &filter.search,
                    &filter.category,
                    &filter.min_price,
                    &filter.max_price,
                ))
                .await;

            let rows = screen.rows().await;
            println!("{:<6} {:<40} {:>10} {:<20} IMAGE", "ID", "NAME", "PRICE", "CATEGORY");
            for row in &rows {
                println!(
                    "{:<6} {:<40} {:>10.2} {:<20} {}",
                    id_text(row.product.id),
                    truncate(&row.product.name, 40),
                    row.product.sell_price,
                    truncate(&row.category_name, 20),
                    row.image_url.as_deref().unwrap_or("-"),
                );
            }
            println!("{} product(s)", rows.len());
        }
        ProductCommands::Show { id } => {
            let screen = ProductEditorScreen::new(ctx);
            let form = screen.open(Some(id)).await?;
            print_product_form(&form);
            for url in screen.gallery(id).await? {
                println!("  image: {}", url);
            }
        }
        ProductCommands::Import { url, category } => {
            let screen = ProductsScreen::new(ctx);
            screen.import(&ImportForm::new(url, category)).await?;
            println!("Product imported successfully");
        }
        ProductCommands::Scrape => {
            ProductsScreen::new(ctx).trigger_scrape_update().await?;
            println!("Async update started. This may take a while.");
        }
        ProductCommands::Delete { id } => {
            ProductsScreen::new(ctx).delete(id).await?;
            println!("Product {} deleted", id);
        }
    }
    Ok(())
}

fn print_product_form(form: &storefront_admin::forms::ProductForm) {
    let rows = [
        ("id", id_text(form.id)),
        ("name", form.name.clone()),
        ("details", form.details.clone()),
        ("sell price", form.sell_price.map(|p| format!("{:.2}", p)).unwrap_or_default()),
        ("base price", format!("{:.2}", form.base_price)),
        ("original price", format!("{:.2}", form.original_price)),
        ("discount", format!("{}", form.discount)),
        ("currency", form.currency.clone()),
        ("shipping cost", format!("{:.2}", form.shipping_cost)),
        ("delivery days", form.delivery_estimate_days.clone()),
        ("delivery from", form.delivery_min_date.clone()),
        ("delivery to", form.delivery_max_date.clone()),
        ("seller", form.seller_name.clone()),
        ("external id", form.external_id.clone()),
        ("source url", form.source_url.clone()),
        ("category", form.category.to_string()),
    ];
    for (label, value) in rows {
        println!("{:<16} {}", label, value);
    }
}

async fn categories(ctx: ScreenContext, command: CategoryCommands) -> Result<()> {
    let screen = CategoriesScreen::new(ctx);
    match command {
        CategoryCommands::List => {
            let categories = screen.load().await?;
            println!("{:<6} {:<30} LOGO", "ID", "NAME");
            for category in &categories {
                println!(
                    "{:<6} {:<30} {}",
                    id_text(category.id),
                    truncate(&category.name, 30),
                    screen.logo_url(category).unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        CategoryCommands::Create { name, logo } => {
            let created = screen.create(&CategoryForm::new(name, logo)).await?;
            println!("Category '{}' created", created.name);
        }
        CategoryCommands::Delete { id } => {
            screen.delete(id).await?;
            println!("Category {} deleted", id);
        }
    }
    Ok(())
}

async fn orders(ctx: ScreenContext, command: OrderCommands) -> Result<()> {
    let screen = OrdersScreen::new(ctx);
    match command {
        OrderCommands::List { status } => {
            let orders = screen.select(status).await?;
            println!("{:<8} {:<8} {:>10} {:<12} {:<12} ACTIONS", "ID", "USER", "TOTAL", "CREATED", "STATUS");
            for order in &orders {
                let mut actions: Vec<&str> = next_action(order.status).map(|a| a.label).into_iter().collect();
                if can_delete(order.status) {
                    actions.push("Delete");
                }
                println!(
                    "{:<8} {:<8} {:>10.2} {:<12} {:<12} {}",
                    order.id,
                    order.user_id,
                    order.total,
                    order.created_date().map(|d| d.to_string()).unwrap_or_default(),
                    order.status,
                    actions.join(", "),
                );
            }
            println!("{} {} order(s)", orders.len(), status);
        }
        OrderCommands::Advance { id, status, note } => {
            screen.select(status).await?;
            let target = screen.advance(id, note).await?;
            println!("Order #{} moved to {}", id, target);
        }
        OrderCommands::Delete { id, status } => {
            screen.select(status).await?;
            screen.delete(id).await?;
            println!("Order #{} deleted", id);
        }
    }
    Ok(())
}

async fn tracking(ctx: ScreenContext, command: TrackingCommands) -> Result<()> {
    let screen = TrackingScreen::new(ctx);
    match command {
        TrackingCommands::Lookup { order_id } => {
            let record = screen.lookup(&order_id).await?;
            print_tracking(&record);
        }
        TrackingCommands::Update { order_id } => {
            let record = screen.update(&order_id).await?;
            println!("Tracking updated successfully");
            print_tracking(&record);
        }
        TrackingCommands::Scrape {
            tracking_number,
            order_id,
        } => {
            screen.scrape(&ScrapeForm::new(tracking_number, order_id)).await?;
            println!("Scraping initiated successfully");
        }
    }
    Ok(())
}

fn print_tracking(record: &TrackingRecord) {
    let rows = [
        ("order", &record.order_id),
        ("tracking number", &record.tracking_number),
        ("status", &record.status),
        ("description", &record.status_description),
        ("origin", &record.origin),
        ("destination", &record.destination),
        ("days on route", &record.days_on_route),
        ("couriers", &record.couriers),
        ("weight", &record.weight),
    ];
    for (label, value) in rows {
        println!("{:<16} {}", label, value.as_deref().unwrap_or("-"));
    }
    if let Some(timeline) = &record.timeline {
        println!("timeline:");
        for line in timeline.lines() {
            println!("  {}", line);
        }
    }
}

async fn banners(ctx: ScreenContext, command: BannerCommands) -> Result<()> {
    let screen = BannersScreen::new(ctx);
    match command {
        BannerCommands::List => {
            let banners = screen.load().await?;
            println!("{:<6} {:<30} {:<30} IMAGE", "ID", "TITLE", "LINK");
            for banner in &banners {
                println!(
                    "{:<6} {:<30} {:<30} {}",
                    id_text(banner.id),
                    truncate(&banner.title, 30),
                    truncate(&banner.link_url, 30),
                    screen.image_url(banner).unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        BannerCommands::Create {
            title,
            description,
            image,
            link_url,
            link_name,
        } => {
            let form = BannerForm {
                title,
                description,
                link_url,
                link_name,
                image: Some(ImageRef::Pending(LocalImage::from_path(&image).await?)),
                ..BannerForm::new()
            };
            let saved = screen.save(&form).await?;
            println!("Banner '{}' created", saved.title);
        }
        BannerCommands::Delete { id } => {
            screen.delete(id).await?;
            println!("Banner {} deleted", id);
        }
    }
    Ok(())
}

async fn blog(ctx: ScreenContext, command: BlogCommands) -> Result<()> {
    let screen = BlogScreen::new(ctx);
    match command {
        BlogCommands::List => {
            let posts = screen.load().await?;
            println!("{:<6} {:<40} {:<20} {:>5} TAGS", "ID", "TITLE", "AUTHOR", "MIN");
            for post in &posts {
                println!(
                    "{:<6} {:<40} {:<20} {:>5} {}",
                    id_text(post.id),
                    truncate(&post.title, 40),
                    truncate(&post.author, 20),
                    post.read_time,
                    post.tag_list().join(", "),
                );
            }
        }
        BlogCommands::Delete { id } => {
            screen.delete(id).await?;
            println!("Post {} deleted", id);
        }
    }
    Ok(())
}

async fn settings(ctx: ScreenContext, command: SettingsCommands) -> Result<()> {
    let screen = SettingsScreen::new(ctx);
    let margin = match command {
        SettingsCommands::Get => screen.load().await?,
        SettingsCommands::SetMargin { percentage } => {
            screen.save(&ProfitMarginForm::new(percentage)).await?
        }
    };
    println!("Profit margin: {}%", margin.percentage);
    Ok(())
}

async fn best(ctx: ScreenContext, command: BestCommands) -> Result<()> {
    let screen = BestProductsScreen::new(ctx);
    let products: Vec<Product> = match command {
        BestCommands::List => screen.load().await?,
        BestCommands::Add { product_id } => {
            screen.add(product_id).await?;
            screen.products().await
        }
        BestCommands::Remove { product_id } => {
            screen.remove(product_id).await?;
            screen.products().await
        }
    };

    println!("{:<6} {:<40} {:>10}", "ID", "NAME", "PRICE");
    for product in &products {
        println!(
            "{:<6} {:<40} {:>10.2}",
            id_text(product.id),
            truncate(&product.name, 40),
            product.sell_price
        );
    }
    Ok(())
}

fn id_text(id: Option<EntityId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}

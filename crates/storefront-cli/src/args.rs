//! Command line definition
//!
//! Built with the clap builder API and converted into a typed
//! [`Invocation`] before anything runs.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use storefront_model::{ProductForm, ProductId, StatusFilter, StoreForm, StoreId};

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// `--api-url`, overrides config file and environment
    pub api_url: Option<String>,
    /// `--config`, TOML file to load
    pub config: Option<PathBuf>,
    /// `--offline`, use the seeded in-memory gateway
    pub offline: bool,
    /// `--log-json`, JSON log lines on stderr
    pub log_json: bool,
}

/// What to do
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// List stores, optionally filtered by a search query
    Stores { search: Option<String> },
    /// Select a store and print its details pane
    Show { store: StoreId, status: StatusFilter },
    /// Submit the create-store form
    CreateStore(StoreForm),
    /// Submit the create-product form for a store
    CreateProduct { store: StoreId, form: ProductForm },
    /// Delete a store after confirmation
    DeleteStore(StoreId),
    /// Delete a product after confirmation
    DeleteProduct(ProductId),
    /// Print the rendered document as HTML
    Render {
        store: Option<StoreId>,
        status: StatusFilter,
    },
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub global: GlobalArgs,
    pub action: Action,
}

fn parse_status(text: &str) -> Result<StatusFilter, storefront_model::ValidationError> {
    text.parse()
}

fn status_arg() -> Arg {
    Arg::new("status")
        .long("status")
        .default_value("all")
        .value_parser(parse_status)
        .help("Status filter: all, OK, STORAGE or OUT_OF_STOCK")
}

fn text_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

/// The `storefront` command
#[must_use]
pub fn command() -> Command {
    Command::new("storefront")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Store and product management console")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("API origin, e.g. http://localhost:3000"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use built-in demonstration data instead of the API"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs as JSON lines"),
        )
        .subcommand(
            Command::new("stores")
                .about("List stores")
                .arg(Arg::new("search").long("search").help("Match name, address or floor area")),
        )
        .subcommand(
            Command::new("show")
                .about("Show a store's contacts, status summary and products")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Store id"),
                )
                .arg(status_arg()),
        )
        .subcommand(
            Command::new("create-store")
                .about("Create a store")
                .arg(text_arg("name", "Store name"))
                .arg(text_arg("email", "Contact email"))
                .arg(text_arg("phone", "Phone number"))
                .arg(text_arg("address", "Street address"))
                .arg(text_arg("established", "Date established"))
                .arg(text_arg("floor-area", "Floor area in square metres")),
        )
        .subcommand(
            Command::new("create-product")
                .about("Create a product in a store")
                .arg(
                    Arg::new("store")
                        .long("store")
                        .required(true)
                        .value_parser(value_parser!(u64))
                        .help("Owning store id"),
                )
                .arg(text_arg("name", "Product name"))
                .arg(text_arg("price", "Price in USD"))
                .arg(text_arg("specs", "Specifications"))
                .arg(text_arg("rating", "Rating from 0 to 5"))
                .arg(text_arg("supplier", "Supplier information"))
                .arg(text_arg("made-in", "Country of manufacture"))
                .arg(text_arg("company", "Production company name"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("OK")
                        .help("OK, STORAGE or OUT_OF_STOCK"),
                ),
        )
        .subcommand(
            Command::new("delete-store")
                .about("Delete a store")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
        )
        .subcommand(
            Command::new("delete-product")
                .about("Delete a product")
                .arg(Arg::new("id").required(true).value_parser(value_parser!(u64))),
        )
        .subcommand(
            Command::new("render")
                .about("Print the rendered document as HTML")
                .arg(
                    Arg::new("store")
                        .long("store")
                        .value_parser(value_parser!(u64))
                        .help("Store to select before rendering"),
                )
                .arg(status_arg()),
        )
}

fn text(args: &ArgMatches, name: &str) -> String {
    args.get_one::<String>(name).cloned().unwrap_or_default()
}

fn id(args: &ArgMatches, name: &str) -> Result<u64> {
    args.get_one::<u64>(name)
        .copied()
        .with_context(|| format!("missing --{name}"))
}

fn status(args: &ArgMatches) -> StatusFilter {
    args.get_one::<StatusFilter>("status").copied().unwrap_or_default()
}

impl Invocation {
    /// Parse process arguments
    ///
    /// # Errors
    /// Returns clap's usage error for malformed input.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    /// Convert clap matches into an invocation
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let global = GlobalArgs {
            api_url: matches.get_one::<String>("api-url").cloned(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            offline: matches.get_flag("offline"),
            log_json: matches.get_flag("log-json"),
        };

        let action = match matches.subcommand() {
            Some(("stores", args)) => Action::Stores {
                search: args.get_one::<String>("search").cloned(),
            },
            Some(("show", args)) => Action::Show {
                store: StoreId(id(args, "id")?),
                status: status(args),
            },
            Some(("create-store", args)) => Action::CreateStore(StoreForm {
                name: text(args, "name"),
                email: text(args, "email"),
                phone_number: text(args, "phone"),
                address: text(args, "address"),
                established: text(args, "established"),
                floor_area: text(args, "floor-area"),
            }),
            Some(("create-product", args)) => Action::CreateProduct {
                store: StoreId(id(args, "store")?),
                form: ProductForm {
                    name: text(args, "name"),
                    price: text(args, "price"),
                    specs: text(args, "specs"),
                    rating: text(args, "rating"),
                    supplier_info: text(args, "supplier"),
                    made_in: text(args, "made-in"),
                    production_company_name: text(args, "company"),
                    status: text(args, "status"),
                },
            },
            Some(("delete-store", args)) => Action::DeleteStore(StoreId(id(args, "id")?)),
            Some(("delete-product", args)) => Action::DeleteProduct(ProductId(id(args, "id")?)),
            Some(("render", args)) => Action::Render {
                store: args.get_one::<u64>("store").copied().map(StoreId),
                status: status(args),
            },
            Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
            None => anyhow::bail!("a subcommand is required"),
        };

        Ok(Self { global, action })
    }
}

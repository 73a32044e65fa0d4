use clap::{Args, Subcommand};
use motocat_core::{
    Brand, BrandInput, Category, CategoryInput, Entity, FormInput, Motorcycle, MotorcycleInput,
};
use motocat_store::{apply_schema, reset, seed, Catalog, PgCatalog};
use serde::Serialize;

use crate::{CliError, Command};

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// Create the catalog tables when missing.
    Init,
    /// Insert the seed categories, brands and motorcycles.
    Seed,
    /// Drop, recreate and seed every catalog table.
    Reset {
        /// Confirm that existing rows will be deleted.
        #[arg(long)]
        yes: bool,
    },
}

/// Commands shared by categories and brands.
#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// List every record.
    List,
    /// Show one record and its motorcycles.
    Show { id: i32 },
    /// Create a record from `-f field=value` pairs.
    New(FieldArgs),
    /// Replace a record's fields.
    Edit {
        id: i32,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record and, by cascade, its motorcycles.
    Delete { id: i32 },
}

#[derive(Subcommand, Debug)]
pub enum MotorcycleCommand {
    /// List motorcycles, optionally filtered by brand or category.
    List {
        #[arg(long, conflicts_with = "category")]
        brand: Option<i32>,
        #[arg(long)]
        category: Option<i32>,
    },
    /// Show one motorcycle.
    Show { id: i32 },
    /// Create a motorcycle from `-f field=value` pairs.
    New(FieldArgs),
    /// Update a motorcycle. Omitted stock_quantity, description and
    /// image_url keep their stored values.
    Edit {
        id: i32,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a motorcycle.
    Delete { id: i32 },
}

#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Form field as `name=value`; repeat for each field.
    #[arg(short = 'f', long = "field", value_name = "FIELD=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

impl FieldArgs {
    fn form(&self) -> FormInput {
        self.fields.iter().cloned().collect()
    }
}

impl RecordCommand {
    fn fields(&self) -> Option<&FieldArgs> {
        match self {
            RecordCommand::New(fields) | RecordCommand::Edit { fields, .. } => Some(fields),
            _ => None,
        }
    }
}

impl MotorcycleCommand {
    fn fields(&self) -> Option<&FieldArgs> {
        match self {
            MotorcycleCommand::New(fields) | MotorcycleCommand::Edit { fields, .. } => {
                Some(fields)
            }
            _ => None,
        }
    }
}

/// Validate submitted fields so form errors are reported before any
/// connection is attempted.
pub fn check_forms(command: &Command) -> Result<(), CliError> {
    match command {
        Command::Db(_) => {}
        Command::Categories(action) => {
            if let Some(fields) = action.fields() {
                CategoryInput::from_form(&fields.form())?;
            }
        }
        Command::Brands(action) => {
            if let Some(fields) = action.fields() {
                BrandInput::from_form(&fields.form())?;
            }
        }
        Command::Motorcycles(action) => {
            if let Some(fields) = action.fields() {
                MotorcycleInput::from_form(&fields.form())?;
            }
        }
    }
    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((field.to_string(), value.to_string()))
}

/// Acknowledgement printed after a create or delete.
#[derive(Serialize)]
struct Changed {
    action: &'static str,
    entity: Entity,
    id: i32,
}

#[derive(Serialize)]
struct CategoryDetail {
    category: Category,
    motorcycles: Vec<Motorcycle>,
}

#[derive(Serialize)]
struct BrandDetail {
    brand: Brand,
    motorcycles: Vec<Motorcycle>,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run_db(catalog: &PgCatalog, command: DbCommand) -> Result<(), CliError> {
    let pool = catalog.pool();
    match command {
        DbCommand::Init => apply_schema(pool).await?,
        DbCommand::Seed => seed(pool).await?,
        DbCommand::Reset { yes: false } => {
            return Err(CliError::InvalidArgs(
                "db reset deletes every row; pass --yes to confirm".to_string(),
            ));
        }
        DbCommand::Reset { yes: true } => reset(pool).await?,
    }
    Ok(())
}

pub async fn run_categories<C: Catalog>(
    catalog: &C,
    command: RecordCommand,
) -> Result<(), CliError> {
    match command {
        RecordCommand::List => print_json(&catalog.list_categories().await?),
        RecordCommand::Show { id } => {
            let category = catalog.get_category(id).await?;
            let motorcycles = catalog.list_motorcycles_by_category(id).await?;
            print_json(&CategoryDetail {
                category,
                motorcycles,
            })
        }
        RecordCommand::New(args) => {
            let input = CategoryInput::from_form(&args.form())?;
            let id = catalog.create_category(&input).await?;
            print_json(&Changed {
                action: "created",
                entity: Entity::Category,
                id,
            })
        }
        RecordCommand::Edit { id, fields } => {
            let input = CategoryInput::from_form(&fields.form())?;
            print_json(&catalog.update_category(id, &input).await?)
        }
        RecordCommand::Delete { id } => {
            catalog.delete_category(id).await?;
            print_json(&Changed {
                action: "deleted",
                entity: Entity::Category,
                id,
            })
        }
    }
}

pub async fn run_brands<C: Catalog>(catalog: &C, command: RecordCommand) -> Result<(), CliError> {
    match command {
        RecordCommand::List => print_json(&catalog.list_brands().await?),
        RecordCommand::Show { id } => {
            let brand = catalog.get_brand(id).await?;
            let motorcycles = catalog.list_motorcycles_by_brand(id).await?;
            print_json(&BrandDetail { brand, motorcycles })
        }
        RecordCommand::New(args) => {
            let input = BrandInput::from_form(&args.form())?;
            let id = catalog.create_brand(&input).await?;
            print_json(&Changed {
                action: "created",
                entity: Entity::Brand,
                id,
            })
        }
        RecordCommand::Edit { id, fields } => {
            let input = BrandInput::from_form(&fields.form())?;
            print_json(&catalog.update_brand(id, &input).await?)
        }
        RecordCommand::Delete { id } => {
            catalog.delete_brand(id).await?;
            print_json(&Changed {
                action: "deleted",
                entity: Entity::Brand,
                id,
            })
        }
    }
}

pub async fn run_motorcycles<C: Catalog>(
    catalog: &C,
    command: MotorcycleCommand,
) -> Result<(), CliError> {
    match command {
        MotorcycleCommand::List { brand, category } => {
            let motorcycles = match (brand, category) {
                (Some(brand_id), _) => catalog.list_motorcycles_by_brand(brand_id).await?,
                (None, Some(category_id)) => {
                    catalog.list_motorcycles_by_category(category_id).await?
                }
                (None, None) => catalog.list_motorcycles().await?,
            };
            print_json(&motorcycles)
        }
        MotorcycleCommand::Show { id } => print_json(&catalog.get_motorcycle(id).await?),
        MotorcycleCommand::New(args) => {
            let input = MotorcycleInput::from_form(&args.form())?;
            let id = catalog.create_motorcycle(&input).await?;
            print_json(&Changed {
                action: "created",
                entity: Entity::Motorcycle,
                id,
            })
        }
        MotorcycleCommand::Edit { id, fields } => {
            let input = MotorcycleInput::from_form(&fields.form())?;
            print_json(&catalog.update_motorcycle(id, &input).await?)
        }
        MotorcycleCommand::Delete { id } => {
            catalog.delete_motorcycle(id).await?;
            print_json(&Changed {
                action: "deleted",
                entity: Entity::Motorcycle,
                id,
            })
        }
    }
}

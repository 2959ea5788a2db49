//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OrexArgs, OutputArgs, OutputFormat, SearchArgs};
use crate::config::{load_config, RegistryConfig};
use crate::error::{Result, ResultExt};
use crate::output::write_products_to_parquet;
use crate::products::{OrexProducts, Products};
use crate::registry::{Product, RegistryClient};
use futures::{Stream, StreamExt, TryStreamExt};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = RegistryClient::from_config(&self.load_config()?)?;
        debug!(base_url = client.base_url(), "registry client ready");

        match &self.cli.command {
            Commands::Search(args) => self.search(client, args).await,
            Commands::Orex(args) => self.orex(client, args).await,
        }
    }

    /// Configuration file, or defaults, with the command-line base URL applied
    fn load_config(&self) -> Result<RegistryConfig> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => RegistryConfig::default(),
        };

        Ok(match &self.cli.base_url {
            Some(base_url) => config.with_base_url(base_url.as_str()),
            None => config,
        })
    }

    async fn search(&self, client: RegistryClient, args: &SearchArgs) -> Result<()> {
        let mut products = Products::new(client);
        args.apply(&mut products)?;
        products.fields(&args.output.field_names())?;

        info!(q = %products.query(), "searching products");
        self.emit(products.stream(), &args.output).await
    }

    async fn orex(&self, client: RegistryClient, args: &OrexArgs) -> Result<()> {
        let mut products = OrexProducts::new(client);
        if let Some(km) = args.range {
            products.within_range(km)?;
        }
        if let Some(bbox) = args.bbox {
            products.within_bbox(bbox.lat_min, bbox.lat_max, bbox.lon_min, bbox.lon_max)?;
        }
        products.fields(&args.output.field_names())?;

        info!(q = %products.query(), "searching OSIRIS-REx products");
        self.emit(products.stream(), &args.output).await
    }

    /// Print products to stdout or write them to a Parquet file
    async fn emit<S>(&self, products: S, output: &OutputArgs) -> Result<()>
    where
        S: Stream<Item = Result<Product>>,
    {
        let start = Instant::now();
        let products = products.take(output.max_records.unwrap_or(usize::MAX));
        futures::pin_mut!(products);

        if let Some(path) = &output.output {
            let collected: Vec<Product> = products.try_collect().await?;
            if collected.is_empty() {
                info!("no product matched, nothing written");
                return Ok(());
            }
            write_products_to_parquet(path, &collected, None)
                .with_context(|| format!("writing {}", path.display()))?;
            return Ok(());
        }

        let mut count = 0usize;
        while let Some(product) = products.try_next().await? {
            self.output_product(&product)?;
            count += 1;
        }

        info!(
            count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(())
    }

    fn output_product(&self, product: &Product) -> Result<()> {
        let mut out = std::io::stdout().lock();
        match self.cli.format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(product)?)?,
            OutputFormat::Pretty => writeln!(out, "{}", serde_json::to_string_pretty(product)?)?,
        }
        Ok(())
    }
}

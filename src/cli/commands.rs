use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Select};
use tracing::info;

use crate::{
    cli::args::*,
    models::Product,
    page::{Catalog, ClickTarget, HtmlPanel},
    services::BasketWidget,
    utils::{
        formatting::{format_basket_summary, format_basket_table, format_catalog_table, js_number},
        Config,
    },
};

static CART: Emoji<'_, '_> = Emoji("🛒 ", "");
static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");

pub struct CliApp {
    config: Config,
    widget: BasketWidget<Catalog, HtmlPanel>,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path)
            .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;
        let panel = HtmlPanel::new(config.currency.clone(), config.unit_label.clone());

        Ok(Self {
            config,
            widget: BasketWidget::new(catalog, panel),
        })
    }

    pub fn widget(&self) -> &BasketWidget<Catalog, HtmlPanel> {
        &self.widget
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog => self.handle_catalog(),
            Commands::Add { cards, html } => self.handle_add(&cards, html),
            Commands::Click { targets, html } => self.handle_click(&targets, html),
            Commands::Shop => self.handle_shop(),
        }
    }

    fn handle_catalog(&self) -> Result<()> {
        let catalog = self.widget.source();
        if catalog.is_empty() {
            println!("{} Catalog is empty", INFO);
            return Ok(());
        }

        println!("{}", format_catalog_table(catalog.cards(), &self.config.currency));
        Ok(())
    }

    fn handle_add(&mut self, cards: &[usize], html: bool) -> Result<()> {
        // Check every index first so a typo adds nothing.
        for &card in cards {
            self.widget
                .source()
                .card(card)
                .with_context(|| format!("Cannot add card #{}", card))?;
        }

        for &card in cards {
            self.widget.handle_click(&ClickTarget::add_button(card));
        }
        info!("Dispatched {} add clicks", cards.len());

        self.print_basket(html);
        Ok(())
    }

    fn handle_click(&mut self, targets: &[String], html: bool) -> Result<()> {
        for raw in targets {
            let target: ClickTarget = raw
                .parse()
                .with_context(|| format!("Cannot parse click target '{}'", raw))?;
            self.widget.handle_click(&target);
        }

        self.print_basket(html);
        Ok(())
    }

    fn handle_shop(&mut self) -> Result<()> {
        println!("{} {}", CART, style("Shop").bold().cyan());

        let theme = ColorfulTheme::default();
        let mut choices: Vec<String> = self
            .widget
            .source()
            .cards()
            .iter()
            .map(|card| {
                let product = Product::from_card(card);
                format!(
                    "Add {} ({}{})",
                    product.display_name(),
                    self.config.currency,
                    js_number(product.price)
                )
            })
            .collect();
        let toggle_choice = choices.len();
        choices.push("Toggle basket".to_string());
        let done_choice = choices.len();
        choices.push("Done".to_string());

        loop {
            let selection = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&choices)
                .default(0)
                .interact()?;

            if selection == done_choice {
                break;
            }

            if selection == toggle_choice {
                self.widget.toggle_visibility();
            } else {
                self.widget.handle_click(&ClickTarget::add_button(selection));
                println!("{} Added to basket", CHECKMARK);
            }

            self.print_basket(false);
        }

        Ok(())
    }

    fn print_basket(&self, html: bool) {
        let panel = self.widget.view();
        println!(
            "{}",
            format_basket_summary(
                panel.count_text(),
                panel.total_text(),
                &self.config.currency,
                self.widget.is_hidden()
            )
        );

        let table = format_basket_table(self.widget.basket(), &self.config.currency);
        if table.is_empty() {
            println!("{} Basket is empty", INFO);
        } else {
            println!("{}", table);
        }

        if html {
            println!("{}", panel.icon_html());
            print!("{}", panel.to_html());
        }
    }
}

//! Read-only commands: stored tree, visible tree and drop zones.

use std::path::Path;

use paneldeck_core::dnd::{build_drop_zones, hit_test};
use paneldeck_core::geometry::{Point, Rect};
use paneldeck_core::layout::PanelId;
use paneldeck_core::panels::{EmptyRegistry, PanelCatalog};
use paneldeck_core::render::{layout_rects, render_tree};
use serde_json::json;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format;
use crate::util::{open_store, require_panel};

/// Show the stored layout command handler
pub fn cmd_show(config_path: Option<&Path>, output: OutputFormat) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    match output {
        OutputFormat::Tree => {
            print!("{}", format::layout_tree(store.layout(), store.visibility()));
            println!("mobile: {}", store.mobile_panels());
        }
        OutputFormat::Json => {
            let value = json!({
                "layout": store.layout(),
                "visibility": store.visibility(),
                "mobilePanels": store.mobile_panels().as_slice(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

/// Show the visible layout command handler
pub fn cmd_render(
    config_path: Option<&Path>,
    width: f64,
    height: f64,
    output: OutputFormat,
) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let bounds = bounds(width, height)?;
    let catalog = PanelCatalog::new(EmptyRegistry);

    let Some(rendered) = render_tree(store.layout(), store.visibility(), &catalog) else {
        println!("Nothing visible");
        return Ok(());
    };
    let rects = layout_rects(&rendered, bounds);
    match output {
        OutputFormat::Tree => print!("{}", format::render_tree(&rendered, &rects)),
        OutputFormat::Json => {
            let rects: Vec<_> = rects
                .iter()
                .map(|(node, rect)| json!({ "node": node, "rect": rect }))
                .collect();
            let value = json!({ "tree": rendered, "rects": rects });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

/// List drop zones command handler
pub fn cmd_zones(
    config_path: Option<&Path>,
    dragging: &PanelId,
    width: f64,
    height: f64,
    at: Option<(f64, f64)>,
) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    require_panel(store.layout(), dragging)?;
    let bounds = bounds(width, height)?;
    let catalog = PanelCatalog::new(EmptyRegistry);

    let Some(rendered) = render_tree(store.layout(), store.visibility(), &catalog) else {
        println!("Nothing visible");
        return Ok(());
    };
    let zones = build_drop_zones(
        &rendered,
        store.layout(),
        bounds,
        Some(dragging),
        store.settings(),
    );

    match at {
        Some((x, y)) => match hit_test(&zones, Point::new(x, y)) {
            Some(target) => println!("{target}"),
            None => println!("No drop zone"),
        },
        None => print!("{}", format::zones(&zones)),
    }
    Ok(())
}

fn bounds(width: f64, height: f64) -> Result<Rect, CliError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(Rect::new(0.0, 0.0, width, height))
    } else {
        Err(CliError::InvalidArgument(format!(
            "layout area must be positive, got {width}x{height}"
        )))
    }
}

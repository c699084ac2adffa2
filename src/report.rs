use prettytable::{format, Cell, Row, Table};

use crate::catalog::{IconSpec, PlatformTag};
use crate::image_processing::RenderedIcon;
use crate::packager::filename_for;
use crate::utils::format_bytes;

/// Table of catalog entries
pub fn catalog_table(specs: &[IconSpec]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("#"),
        Cell::new("Platform"),
        Cell::new("Size"),
        Cell::new("Pixels"),
        Cell::new("Idiom / Density"),
        Cell::new("Scale"),
        Cell::new("Marketing"),
    ]));

    for (i, spec) in specs.iter().enumerate() {
        let pixels = spec
            .dimensions()
            .map(|d| d.to_string())
            .unwrap_or_else(|_| "invalid".to_string());
        let tag = match spec.tag {
            PlatformTag::Idiom(idiom) => idiom.to_string(),
            PlatformTag::Density(density) => density.to_string(),
        };

        table.add_row(Row::new(vec![
            Cell::new(&(i + 1).to_string()),
            Cell::new(&spec.platform().to_string()),
            Cell::new(spec.size),
            Cell::new(&pixels),
            Cell::new(&tag),
            Cell::new(spec.scale.unwrap_or("-")),
            Cell::new(if spec.marketing { "yes" } else { "" }),
        ]));
    }

    table
}

/// Preview of generated icons: label, pixel size, archive name and PNG size
pub fn preview_table(icons: &[RenderedIcon]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    table.add_row(Row::new(vec![
        Cell::new("Icon"),
        Cell::new("Pixels"),
        Cell::new("File"),
        Cell::new("PNG"),
    ]));

    for icon in icons {
        let file = filename_for(icon, icon.spec.platform()).unwrap_or_default();
        table.add_row(Row::new(vec![
            Cell::new(&icon.label()),
            Cell::new(&icon.dimensions.to_string()),
            Cell::new(&file),
            Cell::new(&format_bytes(icon.png.len())),
        ]));
    }

    table
}

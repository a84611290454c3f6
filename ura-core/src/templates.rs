//! Starter pages offered by the editor.

use crate::element::{Button, Element, ElementKind, FontWeight, Text};
use crate::page::Page;

#[allow(clippy::too_many_arguments)]
fn label(
    id: &str,
    name: &str,
    (x, y): (f64, f64),
    (width, height): (f64, f64),
    content: &str,
    font_size: f64,
    font_weight: FontWeight,
    color: &str,
) -> Element {
    let mut element = Element::new(ElementKind::Text(Text {
        content: content.to_string(),
        font_size,
        color: color.to_string(),
        font_weight,
    }))
    .with_id(id)
    .at(x, y)
    .sized(width, height);
    element.name = name.to_string();
    element
}

fn option(index: usize, (x, y): (f64, f64), content: &str) -> Element {
    let mut element = Element::new(ElementKind::Button(Button {
        content: content.to_string(),
        background_color: "#60a5fa".to_string(),
        border_radius: 8.0,
        ..Button::default()
    }))
    .with_id(format!("btn-option-{index}"))
    .at(x, y)
    .sized(180.0, 40.0);
    element.name = format!("Option {index}");
    element
}

/// Multiple choice question with four answer buttons.
#[must_use]
pub fn mcq_page() -> Page {
    let mut page = Page::new("MCQ Page")
        .with_id("template-mcq")
        .with_background("#F0F4F7")
        .with_element(label(
            "q-text",
            "Question Text",
            (100.0, 50.0),
            (400.0, 50.0),
            "What is the capital of France?",
            20.0,
            FontWeight::Bold,
            "#000000",
        ));
    for (index, (position, content)) in [
        ((100.0, 120.0), "London"),
        ((320.0, 120.0), "Berlin"),
        ((100.0, 180.0), "Paris"),
        ((320.0, 180.0), "Madrid"),
    ]
    .into_iter()
    .enumerate()
    {
        page = page.with_element(option(index + 1, position, content));
    }
    page.description = Some("A multiple choice question format.".to_string());
    page
}

/// A two-row data table laid out with text cells over a container.
#[must_use]
pub fn table_page() -> Page {
    let mut table = Element::container("#f9fafb")
        .with_id("table-container")
        .at(40.0, 70.0)
        .sized(520.0, 180.0);
    table.name = "Table Container".to_string();

    let mut page = Page::new("Table Page")
        .with_id("template-table")
        .with_background("#ffffff")
        .with_element(label(
            "table-title",
            "Table Title",
            (40.0, 20.0),
            (400.0, 40.0),
            "User Information",
            20.0,
            FontWeight::Bold,
            "#333333",
        ))
        .with_element(table);

    let columns = [(50.0, 120.0), (180.0, 200.0), (390.0, 120.0)];
    let rows: [(f64, [&str; 3]); 3] = [
        (80.0, ["Name", "Email", "Role"]),
        (130.0, ["Jane Doe", "jane.doe@example.com", "Admin"]),
        (180.0, ["John Smith", "john.smith@example.com", "User"]),
    ];

    for (row, (y, cells)) in rows.iter().enumerate() {
        for (col, ((x, width), content)) in columns.iter().zip(cells).enumerate() {
            let (id, name, weight, color) = if row == 0 {
                (
                    format!("th-{}", col + 1),
                    format!("Header {}", col + 1),
                    FontWeight::Bold,
                    "#111827",
                )
            } else {
                (
                    format!("tr{row}-td{}", col + 1),
                    format!("R{row}C{}", col + 1),
                    FontWeight::Normal,
                    "#374151",
                )
            };
            page = page.with_element(label(
                &id,
                &name,
                (*x, *y),
                (*width, 30.0),
                content,
                12.0,
                weight,
                color,
            ));
        }
    }

    page.description = Some("A simple page with a data table.".to_string());
    page
}

/// Heading and paragraph.
#[must_use]
pub fn content_page() -> Page {
    let mut page = Page::new("Content Page")
        .with_id("template-content")
        .with_background("#fefce8")
        .with_element(label(
            "content-title",
            "Title",
            (60.0, 40.0),
            (400.0, 50.0),
            "My Awesome Content Page",
            24.0,
            FontWeight::Bold,
            "#333",
        ))
        .with_element(label(
            "content-paragraph",
            "Paragraph",
            (60.0, 100.0),
            (480.0, 150.0),
            "This is a paragraph of text that you can edit. It's a great starting point \
             for a blog post, an article, or just a simple page with some information. \
             Feel free to change the text, colors, and fonts to match your style.",
            12.0,
            FontWeight::Normal,
            "#555",
        ));
    page.description = Some("A simple template with a heading and paragraph.".to_string());
    page
}

/// All starter pages in menu order.
#[must_use]
pub fn page_templates() -> Vec<Page> {
    vec![mcq_page(), table_page(), content_page()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_stable_ids() {
        let ids: Vec<_> = page_templates().into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids.iter().map(crate::PageId::as_str).collect::<Vec<_>>(),
            vec!["template-mcq", "template-table", "template-content"]
        );
    }

    #[test]
    fn test_table_cells() {
        let page = table_page();
        // title, container, 3 headers, 2 rows of 3
        assert_eq!(page.elements.len(), 11);
        assert!(page.element("tr2-td2").is_some());
        assert!(page.element("th-3").is_some());
    }

    #[test]
    fn test_mcq_options() {
        let page = mcq_page();
        assert_eq!(page.elements.len(), 5);
        let paris = page.element("btn-option-3").expect("option 3");
        assert_eq!(paris.name, "Option 3");
        assert!(matches!(&paris.kind, ElementKind::Button(b) if b.content == "Paris"));
    }
}

//! Example: Basic usage of the element facade

use fos_dom::Document as HostDocument;
use fos_element::{ClientRect, Document, Element};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG=fos_element=trace shows every write)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = HostDocument::new();
    let html = host
        .root()
        .ok_or_else(|| anyhow::anyhow!("document has no root element"))?;
    let doc = Document::new(host);

    let body = Element::new(html.append("body")?);
    let list = doc.create_element("ul")?;
    body.native().append_child(list.native());

    for (i, label) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
        let item = doc.create_element("li")?;
        item.set("data-index", i)?;
        item.add_class("item")?;
        if i == 1 {
            item.add_class("selected")?;
        }
        item.style([("color", "steelblue")])?;
        item.native().set_client_rect(ClientRect {
            top: 20.0 * i as f64,
            left: 0.0,
            width: 120.0,
            height: 20.0,
        });
        list.native().append_child(item.native());
        println!("{item} {label}: classes={:?}", item.class_names());
    }

    let selected = body
        .at_css(["li.selected"])
        .ok_or_else(|| anyhow::anyhow!("no selected item"))?;
    println!(
        "selected index={:?} position={:?}",
        selected.attr("data-index"),
        selected.position()
    );

    // Same string through CSS and XPath; CSS matches come first
    let found = body.search(["li", "ul/li[1]"]);
    println!("search found {} items", found.len());

    // Not a valid path: logged at debug level, empty result
    println!("bad path found {} items", body.xpath("ul[").len());

    Ok(())
}

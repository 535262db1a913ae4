use quick_xml::escape::escape;

use crate::site_map::SitemapEntry;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">";
const XML_FOOTER: &str = "\n</urlset>";

fn format_entry(entry: &SitemapEntry) -> String {
    format!(
        "\n  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>",
        escape(entry.loc.as_str()),
        entry.lastmod,
        entry.changefreq,
        entry.priority_str()
    )
}

/// Renders the whole document, entries in the order given.
pub fn generate_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml_content = String::from(XML_HEADER);
    for entry in entries {
        xml_content.push_str(&format_entry(entry));
    }
    xml_content.push_str(XML_FOOTER);
    xml_content
}

/// Number of `<url>` blocks in a rendered document.
pub fn count_urls(xml_content: &str) -> usize {
    xml_content.matches("<url>").count()
}

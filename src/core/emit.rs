use crate::domain::model::ColorRecord;

/// Renders the static lookup table as Rust source.
///
/// The artifact is `include!`-d by the consuming crate, which is why the
/// value type is spelled `crate::Color`: the path resolves inside the
/// consumer, not here. Entries appear in record order, so the file is
/// byte-identical across runs over the same input pages.
pub fn render_table(records: &[ColorRecord]) -> String {
    let mut out = String::new();
    out.push_str("///  ***  AUTO-GENERATED  – DO NOT EDIT BY HAND  ***\n");
    out.push_str("use phf::{phf_map};\n\n");
    out.push_str("pub static COLORS: phf::Map<&'static str, crate::Color> = phf_map! {\n");

    for record in records {
        let (r, g, b) = record.rgb;
        out.push_str(&format!(
            "    \"{}\" => crate::Color{{ name:\"{}\", hex:\"{}\", rgb:({},{},{}) }},\n",
            record.key,
            escape(&record.name),
            record.hex,
            r,
            g,
            b
        ));
    }

    out.push_str("};\n");
    out
}

// Display names land inside Rust string literals.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

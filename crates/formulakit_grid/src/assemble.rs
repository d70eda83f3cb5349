//! Output assembler: fixed-position insertion of titles, preamble and footers.

use crate::conf::N_TABLE_WIDTH;
use crate::spec::{
    EnumCompositionRow, EnumParagraphVariant, SpecCompositionTable, SpecDocumentTexts,
    SpecParagraphDocument,
};

/// Build one paragraph document.
///
/// Layout: title, legend, blank separator, preamble, group lines, footer.
pub fn assemble_paragraph(
    variant: EnumParagraphVariant,
    group_lines: Vec<String>,
    texts: &SpecDocumentTexts,
) -> SpecParagraphDocument {
    let (c_title, c_legend) = match variant {
        EnumParagraphVariant::EnglishOnly => {
            (&texts.title_english_only, &texts.legend_english_only)
        }
        EnumParagraphVariant::EnglishHindiMix => (
            &texts.title_english_hindi_mix,
            &texts.legend_english_hindi_mix,
        ),
    };

    let mut lines = Vec::with_capacity(group_lines.len() + 5);
    lines.push(c_title.clone());
    lines.push(c_legend.clone());
    lines.push(String::new());
    lines.push(texts.preamble.clone());
    lines.extend(group_lines);
    lines.push(texts.footer.clone());

    SpecParagraphDocument { variant, lines }
}

/// Build the composition table.
///
/// Layout: title and legend captions, column header, group blocks, additives row, footer.
pub fn assemble_composition_table(
    group_blocks: Vec<EnumCompositionRow>,
    texts: &SpecDocumentTexts,
) -> SpecCompositionTable {
    let mut rows = Vec::with_capacity(group_blocks.len() + 5);
    rows.push(EnumCompositionRow::Caption(texts.title_table.clone()));
    rows.push(EnumCompositionRow::Caption(texts.legend_table.clone()));
    rows.push(EnumCompositionRow::Header(texts.table_header.clone()));
    rows.extend(group_blocks);
    rows.push(EnumCompositionRow::Additives {
        name: texts.additives_name.clone(),
        quantity: texts.additives_quantity.clone(),
    });
    rows.push(EnumCompositionRow::Footer(texts.footer.clone()));

    SpecCompositionTable {
        width: usize::max(N_TABLE_WIDTH, texts.table_header.len()),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_lines_are_positional() {
        let texts = SpecDocumentTexts::default();
        let doc = assemble_paragraph(
            EnumParagraphVariant::EnglishHindiMix,
            vec!["G1:\nA 1g.".to_string(), "G2:\nB 2g Permitted Additives QS.".to_string()],
            &texts,
        );
        assert_eq!(doc.lines[0], "Composition (English-Hindi Mix)");
        assert_eq!(doc.lines[1], texts.legend_english_hindi_mix);
        assert_eq!(doc.lines[2], "");
        assert_eq!(doc.lines[3], "Each 50g contains:");
        assert_eq!(doc.lines[4], "G1:\nA 1g.");
        assert_eq!(doc.lines.last().map(String::as_str), Some("*Official Substitute"));
        assert_eq!(doc.lines.len(), 7);
    }

    #[test]
    fn composition_table_frames_group_blocks() {
        let texts = SpecDocumentTexts::default();
        let table = assemble_composition_table(
            vec![EnumCompositionRow::Section("G1".to_string())],
            &texts,
        );
        assert_eq!(table.width, 5);
        assert!(matches!(table.rows[2], EnumCompositionRow::Header(_)));
        assert_eq!(table.rows[3], EnumCompositionRow::Section("G1".to_string()));
        assert_eq!(
            table.rows[4],
            EnumCompositionRow::Additives {
                name: "Permitted Additives".to_string(),
                quantity: "QS".to_string(),
            }
        );
        assert_eq!(
            table.rows[5],
            EnumCompositionRow::Footer("*Official Substitute".to_string())
        );
    }
}

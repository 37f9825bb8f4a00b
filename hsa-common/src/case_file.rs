//! Case-file ("expediente") card view
//!
//! The dashboard shows a fixed set of fields per record. Each field has a
//! declared accessor so missing columns and absent cells consistently render as
//! [`NOT_AVAILABLE`](crate::record::NOT_AVAILABLE).

use serde::Serialize;

use crate::dates::format_cell_date;
use crate::record::{FieldAccessor, RawRecord};
use crate::traceability::{TraceabilityParser, TraceabilityResult};

pub const EXPEDIENTE: FieldAccessor = FieldAccessor::or_placeholder("EXPEDIENTE");
pub const FECHA_DE_REPARTO: FieldAccessor = FieldAccessor::or_placeholder("FECHA DE REPARTO");
pub const REASIGNADO: FieldAccessor = FieldAccessor::or_placeholder("REASIGNADO");
pub const TEMA: FieldAccessor = FieldAccessor::or_placeholder("TEMA");
pub const SOLICITANTE: FieldAccessor = FieldAccessor::or_placeholder("SOLICITANTE");
pub const SEGUIMIENTO: FieldAccessor = FieldAccessor::or_placeholder("SEGUIMIENTO");
pub const ASUNTO: FieldAccessor = FieldAccessor::or_placeholder("ASUNTO");
pub const TRAZABILIDAD: FieldAccessor = FieldAccessor::or_placeholder("TRAZABILIDAD");

/// Structured card for one case-file record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseFileView {
    pub expediente: String,
    /// `dd/mm/yyyy` when the cell holds a recognizable date
    pub fecha_de_reparto: String,
    pub reasignado: String,
    pub tema: String,
    pub solicitante: String,
    pub seguimiento: String,
    pub asunto: String,
    pub trazabilidad: TraceabilityResult,
}

impl CaseFileView {
    /// Build the card, parsing the traceability field with `parser`
    pub fn from_record(record: &RawRecord, parser: &TraceabilityParser) -> Self {
        Self {
            expediente: EXPEDIENTE.read(record).to_string(),
            fecha_de_reparto: format_cell_date(FECHA_DE_REPARTO.read(record)),
            reasignado: REASIGNADO.read(record).to_string(),
            tema: TEMA.read(record).to_string(),
            solicitante: SOLICITANTE.read(record).to_string(),
            seguimiento: SEGUIMIENTO.read(record).to_string(),
            asunto: ASUNTO.read(record).to_string(),
            trazabilidad: parser.parse(TRAZABILIDAD.read_raw(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NOT_AVAILABLE;
    use crate::traceability::ParseOutcome;

    #[test]
    fn test_full_record() {
        let record = RawRecord::from_pairs([
            ("EXPEDIENTE", Some("11001-2024-00123")),
            ("FECHA DE REPARTO", Some("2024-05-14 00:00:00")),
            ("TEMA", Some("Pensión")),
            ("TRAZABILIDAD", Some("14/05/2024 (5 FOLIOS)\n20/06/24 - AL DESPACHO")),
        ]);
        let card = CaseFileView::from_record(&record, &TraceabilityParser::default());

        assert_eq!(card.expediente, "11001-2024-00123");
        assert_eq!(card.fecha_de_reparto, "14/05/2024");
        assert_eq!(card.tema, "Pensión");
        assert_eq!(card.reasignado, NOT_AVAILABLE);
        assert_eq!(card.trazabilidad.len(), 2);
        assert_eq!(card.trazabilidad.events[0].display_date, "20/06/2024");
        assert_eq!(card.trazabilidad.events[1].description, "REPARTO (5 FOLIOS)");
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let card = CaseFileView::from_record(&RawRecord::new(), &TraceabilityParser::default());
        assert_eq!(card.expediente, NOT_AVAILABLE);
        assert_eq!(card.fecha_de_reparto, NOT_AVAILABLE);
        assert_eq!(card.asunto, NOT_AVAILABLE);
        assert!(card.trazabilidad.is_empty());
        assert_eq!(card.trazabilidad.outcome, ParseOutcome::NoInput);
    }
}

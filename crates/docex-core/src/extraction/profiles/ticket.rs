//! Till receipt profile.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::*;
use crate::extraction::rules::{Heuristic, Normalizer, PatternRule, Rule};
use crate::models::document::DocumentType;
use crate::models::record::fields;

use super::DocumentProfile;

lazy_static! {
    static ref TICKET_RULES: Vec<Rule> = vec![
        Rule::field(fields::DATE, vec![
            PatternRule::new(&TICKET_DATE_NUMERIC, 0, Normalizer::Verbatim),
            PatternRule::new(&TICKET_DATE_MONTH_NAME, 0, Normalizer::Verbatim),
            PatternRule::new(&TICKET_DATE_SHORT, 0, Normalizer::Verbatim),
        ]),
        Rule::field(fields::HEURE, vec![
            PatternRule::new(&TIME_OF_DAY, 0, Normalizer::Verbatim),
        ]),
        Rule::field(fields::MONTANT_TOTAL, vec![
            PatternRule::new(&TICKET_TOTAL, 1, Normalizer::DecimalComma),
            PatternRule::new(&TICKET_MONTANT, 1, Normalizer::DecimalComma),
            PatternRule::new(&TICKET_NET_A_PAYER, 1, Normalizer::DecimalComma),
            PatternRule::new(&TICKET_TOTAL_TTC, 1, Normalizer::DecimalComma),
        ]),
        Rule::structural(fields::COMMERCE, Heuristic::MerchantLine),
        Rule::field(fields::NUMERO_TVA, vec![
            PatternRule::new(&VAT_NUMBER, 0, Normalizer::StripWhitespace),
        ]),
        Rule::field(fields::SIRET, vec![
            PatternRule::new(&SIRET, 1, Normalizer::StripWhitespace),
        ]),
    ];
}

/// Receipt profile: date, time, total, merchant, VAT number and SIRET.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketProfile;

impl DocumentProfile for TicketProfile {
    fn document_type(&self) -> DocumentType {
        DocumentType::Ticket
    }

    fn rules(&self) -> &[Rule] {
        &TICKET_RULES
    }
}

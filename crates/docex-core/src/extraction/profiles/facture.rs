//! Invoice profile.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::*;
use crate::extraction::rules::{Heuristic, Normalizer, PatternRule, Rule};
use crate::models::document::DocumentType;
use crate::models::record::fields;

use super::DocumentProfile;

lazy_static! {
    // HT, TVA and TTC are matched independently; no arithmetic cross-check.
    static ref FACTURE_RULES: Vec<Rule> = vec![
        Rule::field(fields::NUM_FACTURE, vec![
            PatternRule::new(&INVOICE_NUMBER_LABELED, 1, Normalizer::Verbatim),
            PatternRule::new(&INVOICE_NUMBER_PREFIXED, 1, Normalizer::Verbatim),
            PatternRule::new(&INVOICE_NUMBER_DIGITS, 1, Normalizer::Verbatim),
        ]),
        Rule::field(fields::DATE_FACTURE, vec![
            PatternRule::new(&INVOICE_DATE_LABELED, 1, Normalizer::Verbatim),
            PatternRule::new(&INVOICE_DATE_INVOICED_ON, 1, Normalizer::Verbatim),
            PatternRule::new(&INVOICE_DATE_ISSUED_ON, 1, Normalizer::Verbatim),
        ]),
        Rule::field(fields::MONTANT_HT, vec![
            PatternRule::new(&TOTAL_HT, 1, Normalizer::DecimalComma),
            PatternRule::new(&MONTANT_HT, 1, Normalizer::DecimalComma),
            PatternRule::new(&HT, 1, Normalizer::DecimalComma),
        ]),
        Rule::field(fields::MONTANT_TVA, vec![
            PatternRule::new(&TVA, 1, Normalizer::DecimalComma),
            PatternRule::new(&TOTAL_TVA, 1, Normalizer::DecimalComma),
            PatternRule::new(&MONTANT_TVA, 1, Normalizer::DecimalComma),
        ]),
        Rule::field(fields::MONTANT_TTC, vec![
            PatternRule::new(&TOTAL_TTC, 1, Normalizer::DecimalComma),
            PatternRule::new(&MONTANT_TTC, 1, Normalizer::DecimalComma),
            PatternRule::new(&TTC, 1, Normalizer::DecimalComma),
        ]),
        Rule::structural(fields::EMETTEUR, Heuristic::CompanyHeader),
    ];
}

/// Invoice profile: number, date, HT/TVA/TTC amounts and issuer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactureProfile;

impl DocumentProfile for FactureProfile {
    fn document_type(&self) -> DocumentType {
        DocumentType::Facture
    }

    fn rules(&self) -> &[Rule] {
        &FACTURE_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INVOICE: &str = "ACME SARL
12 rue de la Paix
75002 Paris
Facture n° F-2023-001
Date de facture: 15/03/2023
Total HT: 100,00
TVA: 20,00
Total TTC: 120,00
";

    #[test]
    fn test_full_invoice() {
        let record = FactureProfile.extract(INVOICE);

        assert_eq!(record.get(fields::TYPE_DOCUMENT), Some("facture"));
        assert_eq!(record.get(fields::NUM_FACTURE), Some("F-2023-001"));
        assert_eq!(record.get(fields::DATE_FACTURE), Some("15/03/2023"));
        assert_eq!(record.get(fields::MONTANT_HT), Some("100.00"));
        assert_eq!(record.get(fields::MONTANT_TVA), Some("20.00"));
        assert_eq!(record.get(fields::MONTANT_TTC), Some("120.00"));
        assert_eq!(record.get(fields::EMETTEUR), Some("ACME SARL"));
    }

    #[test]
    fn test_inconsistent_totals_are_kept() {
        let text = "X SAS\nTotal HT: 100,00\nTVA: 20,00\nTotal TTC: 999,99";
        let record = FactureProfile.extract(text);
        assert_eq!(record.get(fields::MONTANT_HT), Some("100.00"));
        assert_eq!(record.get(fields::MONTANT_TVA), Some("20.00"));
        assert_eq!(record.get(fields::MONTANT_TTC), Some("999.99"));
    }

    #[test]
    fn test_invoice_number_prefixed_label() {
        let record = FactureProfile.extract("N° facture : AB/778");
        assert_eq!(record.get(fields::NUM_FACTURE), Some("AB/778"));
    }

    #[test]
    fn test_invoice_number_digits_only() {
        let record = FactureProfile.extract("Fact. 7");
        assert!(!record.contains(fields::NUM_FACTURE));

        let record = FactureProfile.extract("facture 7");
        assert_eq!(record.get(fields::NUM_FACTURE), Some("7"));
    }

    #[test]
    fn test_invoice_dates() {
        let record = FactureProfile.extract("Facturé le 02-04-2023");
        assert_eq!(record.get(fields::DATE_FACTURE), Some("02-04-2023"));

        let record = FactureProfile.extract("Émis le 9/1/24");
        assert_eq!(record.get(fields::DATE_FACTURE), Some("9/1/24"));
    }

    #[test]
    fn test_amount_label_variants() {
        let text = "Montant H.T. 50,00\nMontant T.T.C. 60,00";
        let record = FactureProfile.extract(text);
        assert_eq!(record.get(fields::MONTANT_HT), Some("50.00"));
        assert_eq!(record.get(fields::MONTANT_TTC), Some("60.00"));
    }

    #[test]
    fn test_issuer_falls_back_to_first_line() {
        let record = FactureProfile.extract("  Plomberie Martin  \nFacture 12");
        assert_eq!(record.get(fields::EMETTEUR), Some("Plomberie Martin"));
    }

    #[test]
    fn test_empty_text() {
        let record = FactureProfile.extract("");
        assert_eq!(record.len(), 2);
    }
}

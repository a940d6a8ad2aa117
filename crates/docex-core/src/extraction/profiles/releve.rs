//! Bank statement profile.

use lazy_static::lazy_static;

use crate::extraction::rules::patterns::*;
use crate::extraction::rules::{Normalizer, PatternRule, Rule};
use crate::models::document::DocumentType;
use crate::models::record::fields;

use super::DocumentProfile;

lazy_static! {
    static ref RELEVE_RULES: Vec<Rule> = vec![
        Rule::field(fields::BANQUE, vec![
            PatternRule::new(&BANK_NETWORK, 0, Normalizer::TitleCase),
            PatternRule::new(&BANK_ONLINE, 0, Normalizer::TitleCase),
        ]),
        Rule::range(fields::DATE_DEBUT, fields::DATE_FIN, vec![
            &*STATEMENT_PERIOD,
            &*PERIOD,
        ]),
        Rule::field(fields::NUMERO_COMPTE, vec![
            PatternRule::new(&ACCOUNT_NUMBER, 1, Normalizer::StripWhitespace),
            PatternRule::new(&ACCOUNT_NUMBER_PREFIXED, 1, Normalizer::StripWhitespace),
            PatternRule::new(&RIB, 1, Normalizer::StripWhitespace),
        ]),
        Rule::field(fields::SOLDE, vec![
            PatternRule::new(&BALANCE_FINAL, 1, Normalizer::DecimalComma),
            PatternRule::new(&BALANCE_NEW, 1, Normalizer::DecimalComma),
            PatternRule::new(&BALANCE_CREDIT, 1, Normalizer::DecimalComma),
            PatternRule::new(&BALANCE_DEBIT, 1, Normalizer::DecimalComma),
        ]),
    ];
}

/// Statement profile: bank, period, account number and closing balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleveProfile;

impl DocumentProfile for ReleveProfile {
    fn document_type(&self) -> DocumentType {
        DocumentType::Releve
    }

    fn rules(&self) -> &[Rule] {
        &RELEVE_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_statement() {
        let text = "BNP PARIBAS\n\
                    Relevé du 01/01/2023 au 31/01/2023\n\
                    Compte n° 12345678901\n\
                    Nouveau solde: -50,00\n";
        let record = ReleveProfile.extract(text);

        assert_eq!(record.get(fields::TYPE_DOCUMENT), Some("releve"));
        assert_eq!(record.get(fields::BANQUE), Some("Bnp Paribas"));
        assert_eq!(record.get(fields::DATE_DEBUT), Some("01/01/2023"));
        assert_eq!(record.get(fields::DATE_FIN), Some("31/01/2023"));
        assert_eq!(record.get(fields::NUMERO_COMPTE), Some("12345678901"));
        assert_eq!(record.get(fields::SOLDE), Some("-50.00"));
    }

    #[test]
    fn test_period_label() {
        let record = ReleveProfile.extract("Période du 1-2-2023 au 28-2-2023");
        assert_eq!(record.get(fields::DATE_DEBUT), Some("1-2-2023"));
        assert_eq!(record.get(fields::DATE_FIN), Some("28-2-2023"));
    }

    #[test]
    fn test_period_missing_leaves_both_dates_out() {
        let record = ReleveProfile.extract("Relevé du 01/01/2023");
        assert!(!record.contains(fields::DATE_DEBUT));
        assert!(!record.contains(fields::DATE_FIN));
    }

    #[test]
    fn test_online_bank_title_case() {
        let record = ReleveProfile.extract("votre banque BOURSORAMA");
        assert_eq!(record.get(fields::BANQUE), Some("Boursorama"));
    }

    #[test]
    fn test_network_bank_preferred_over_online() {
        let record = ReleveProfile.extract("revolut\ncrédit mutuel");
        assert_eq!(record.get(fields::BANQUE), Some("Crédit Mutuel"));
    }

    #[test]
    fn test_masked_account_number() {
        let record = ReleveProfile.extract("N° de compte : xxxx4521");
        assert_eq!(record.get(fields::NUMERO_COMPTE), Some("xxxx4521"));
    }

    #[test]
    fn test_rib_digits() {
        let record = ReleveProfile.extract("RIB 30004000");
        assert_eq!(record.get(fields::NUMERO_COMPTE), Some("30004000"));
    }

    #[test]
    fn test_final_balance_with_date() {
        let record = ReleveProfile.extract("Solde au 31/01/2023 : 1520,35");
        assert_eq!(record.get(fields::SOLDE), Some("1520.35"));
    }

    #[test]
    fn test_credit_balance() {
        let record = ReleveProfile.extract("Solde créditeur 310,00");
        assert_eq!(record.get(fields::SOLDE), Some("310.00"));
    }

    #[test]
    fn test_debit_balance_requires_minus() {
        let record = ReleveProfile.extract("Solde débiteur 75,00");
        assert!(!record.contains(fields::SOLDE));

        let record = ReleveProfile.extract("Solde débiteur -75,00");
        assert_eq!(record.get(fields::SOLDE), Some("-75.00"));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(
            ReleveProfile.field_names(),
            vec!["banque", "date_debut", "date_fin", "numero_compte", "solde"]
        );
    }
}

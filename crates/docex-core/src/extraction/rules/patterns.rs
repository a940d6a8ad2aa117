//! Regex patterns for French receipts, invoices and bank statements.
//!
//! Patterns that belong to the same field are listed in evaluation order.
//! Reordering them changes which value wins.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Receipt dates: DD/MM/YYYY, DD <month> YYYY, DD/MM/YY
    pub static ref TICKET_DATE_NUMERIC: Regex = Regex::new(
        r"(?i)(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    pub static ref TICKET_DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)(\d{1,2} [a-zA-Z]{3,9} \d{2,4})"
    ).unwrap();

    pub static ref TICKET_DATE_SHORT: Regex = Regex::new(
        r"(?i)(\d{2}[/-]\d{2}[/-]\d{2,4})"
    ).unwrap();

    // Time of day: 14:30, 14h30, 14:30:05
    pub static ref TIME_OF_DAY: Regex = Regex::new(
        r"(\d{1,2}[:hH]\d{2}(?::\d{2})?)"
    ).unwrap();

    // Receipt totals
    pub static ref TICKET_TOTAL: Regex = Regex::new(
        r"(?i)total[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref TICKET_MONTANT: Regex = Regex::new(
        r"(?i)montant[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref TICKET_NET_A_PAYER: Regex = Regex::new(
        r"(?i)net à payer[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref TICKET_TOTAL_TTC: Regex = Regex::new(
        r"(?i)total ttc[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    // French intra-community VAT number: FR + 11 digits
    pub static ref VAT_NUMBER: Regex = Regex::new(
        r"(FR\s?\d{2}\s?\d{3}\s?\d{3}\s?\d{3})"
    ).unwrap();

    // SIRET: 14 digits after the label
    pub static ref SIRET: Regex = Regex::new(
        r"(?i)siret[:\s]*(\d{3}\s?\d{3}\s?\d{3}\s?\d{5})"
    ).unwrap();

    // Invoice numbers
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)facture[:\s]*n?[°o]?[:\s]*(\w+[-/]?\w+(?:[-/]\w+)*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_PREFIXED: Regex = Regex::new(
        r"(?i)n°\s?(?:facture|fact)[:\s]*(\w+[-/]?\w+(?:[-/]\w+)*)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_DIGITS: Regex = Regex::new(
        r"(?i)(?:facture|fact)[:\s]*n?[°o]?[:\s]*(\d+)"
    ).unwrap();

    // Invoice dates
    pub static ref INVOICE_DATE_LABELED: Regex = Regex::new(
        r"(?i)date[:\s]*(?:de facture|facture|d'émission)?[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    pub static ref INVOICE_DATE_INVOICED_ON: Regex = Regex::new(
        r"(?i)factur[ée] le[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    pub static ref INVOICE_DATE_ISSUED_ON: Regex = Regex::new(
        r"(?i)émis le[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    // Net amount (hors taxes)
    pub static ref TOTAL_HT: Regex = Regex::new(
        r"(?i)total\s?h\.?t\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref MONTANT_HT: Regex = Regex::new(
        r"(?i)montant\s?h\.?t\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref HT: Regex = Regex::new(
        r"(?i)h\.?t\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    // VAT amount
    pub static ref TVA: Regex = Regex::new(
        r"(?i)tva[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref TOTAL_TVA: Regex = Regex::new(
        r"(?i)total\s?tva[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref MONTANT_TVA: Regex = Regex::new(
        r"(?i)montant\s?tva[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    // Gross amount (toutes taxes comprises)
    pub static ref TOTAL_TTC: Regex = Regex::new(
        r"(?i)total\s?t\.?t\.?c\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref MONTANT_TTC: Regex = Regex::new(
        r"(?i)montant\s?t\.?t\.?c\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref TTC: Regex = Regex::new(
        r"(?i)t\.?t\.?c\.?[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    // Company name followed by its legal form (case-sensitive)
    pub static ref COMPANY_LEGAL_FORM: Regex = Regex::new(
        r"([\w\s]{2,30}?)\s(?:SARL|SAS|SA|EURL|EI|SASU)"
    ).unwrap();

    // Known banks
    pub static ref BANK_NETWORK: Regex = Regex::new(
        r"(?i)(banque populaire|crédit agricole|bnp paribas|société générale|caisse d'épargne|crédit mutuel|lcl|la banque postale|cic|hsbc)"
    ).unwrap();

    pub static ref BANK_ONLINE: Regex = Regex::new(
        r"(?i)(boursorama|fortuneo|ing|monabanq|hello bank|n26|revolut)"
    ).unwrap();

    // Statement period: two dates joined by "du ... au ..."
    pub static ref STATEMENT_PERIOD: Regex = Regex::new(
        r"(?i)relevé du (\d{1,2}[/-]\d{1,2}[/-]\d{2,4}) au (\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    pub static ref PERIOD: Regex = Regex::new(
        r"(?i)période du (\d{1,2}[/-]\d{1,2}[/-]\d{2,4}) au (\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"
    ).unwrap();

    // Account numbers; 'x' masks hidden digits
    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"(?i)compte n°[:\s]*([0-9x]{4,})"
    ).unwrap();

    pub static ref ACCOUNT_NUMBER_PREFIXED: Regex = Regex::new(
        r"(?i)n° de compte[:\s]*([0-9x]{4,})"
    ).unwrap();

    pub static ref RIB: Regex = Regex::new(
        r"(?i)rib[:\s]*([0-9]{4,})"
    ).unwrap();

    // Balances
    pub static ref BALANCE_FINAL: Regex = Regex::new(
        r"(?i)solde (?:final|au \d{1,2}[/-]\d{1,2}[/-]\d{2,4})[:\s]*(-?\d+[.,]\d{2})"
    ).unwrap();

    pub static ref BALANCE_NEW: Regex = Regex::new(
        r"(?i)nouveau solde[:\s]*(-?\d+[.,]\d{2})"
    ).unwrap();

    pub static ref BALANCE_CREDIT: Regex = Regex::new(
        r"(?i)solde créditeur[:\s]*(\d+[.,]\d{2})"
    ).unwrap();

    pub static ref BALANCE_DEBIT: Regex = Regex::new(
        r"(?i)solde débiteur[:\s]*(-\d+[.,]\d{2})"
    ).unwrap();
}

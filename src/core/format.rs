//! Polish presentation of amounts: `12 345,67` and amounts in words
//! ("słownie") for the printed invoice.

use rust_decimal::Decimal;

use super::money::{CURRENCY_SCALE, round_currency};

/// Group separator used by Polish number formatting (no-break space).
pub const GROUP_SEPARATOR: char = '\u{00a0}';

/// Format an amount with two decimals, a decimal comma and no-break-space
/// thousands grouping. Four-digit amounts are not grouped, matching Polish
/// locale conventions.
///
/// ```
/// use faktura_vat::core::format::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(1234.5)), "1234,50");
/// assert_eq!(format_amount(dec!(12345.678)), "12\u{a0}345,68");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    rounded.rescale(CURRENCY_SCALE);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }

    if int_part.len() >= 5 {
        let lead = int_part.len() % 3;
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(ch);
        }
    } else {
        out.push_str(int_part);
    }

    out.push(',');
    out.push_str(frac_part);
    out
}

const UNITS: [&str; 10] = [
    "", "jeden", "dwa", "trzy", "cztery", "pięć", "sześć", "siedem", "osiem", "dziewięć",
];

const TEENS: [&str; 10] = [
    "dziesięć",
    "jedenaście",
    "dwanaście",
    "trzynaście",
    "czternaście",
    "piętnaście",
    "szesnaście",
    "siedemnaście",
    "osiemnaście",
    "dziewiętnaście",
];

const TENS: [&str; 10] = [
    "",
    "",
    "dwadzieścia",
    "trzydzieści",
    "czterdzieści",
    "pięćdziesiąt",
    "sześćdziesiąt",
    "siedemdziesiąt",
    "osiemdziesiąt",
    "dziewięćdziesiąt",
];

const HUNDREDS: [&str; 10] = [
    "",
    "sto",
    "dwieście",
    "trzysta",
    "czterysta",
    "pięćset",
    "sześćset",
    "siedemset",
    "osiemset",
    "dziewięćset",
];

/// Scale words above a thousand, each 10^3 apart (10^6 .. 10^27).
const SCALES: [&str; 8] = [
    "milion",
    "miliard",
    "bilion",
    "biliard",
    "trylion",
    "tryliard",
    "kwadrylion",
    "kwadryliard",
];

/// Spell an amount in Polish words with złoty/grosz declension.
///
/// ```
/// use faktura_vat::core::format::amount_in_words;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_in_words(dec!(123)), "sto dwadzieścia trzy złote");
/// assert_eq!(amount_in_words(dec!(0)), "zero złotych");
/// ```
pub fn amount_in_words(value: Decimal) -> String {
    let rounded = round_currency(value);
    let cents = {
        let mut scaled = rounded.abs();
        scaled.rescale(CURRENCY_SCALE);
        scaled.mantissa().unsigned_abs()
    };
    let zloty = cents / 100;
    let grosze = (cents % 100) as u32;

    let mut words: Vec<String> = Vec::new();
    if rounded.is_sign_negative() && cents > 0 {
        words.push("minus".to_string());
    }

    if zloty > 0 {
        words.push(integer_in_words(zloty));
        words.push(plural(zloty, "złoty", "złote", "złotych").to_string());
    }

    if grosze > 0 {
        words.push(integer_in_words(u128::from(grosze)));
        words.push(plural(u128::from(grosze), "grosz", "grosze", "groszy").to_string());
    }

    if zloty == 0 && grosze == 0 {
        return "zero złotych".to_string();
    }

    words.join(" ")
}

/// Spell a non-negative integer in Polish words.
pub fn integer_in_words(value: u128) -> String {
    if value == 0 {
        return "zero".to_string();
    }

    let mut groups = Vec::new();
    let mut rest = value;
    while rest > 0 {
        groups.push((rest % 1000) as u32);
        rest /= 1000;
    }

    let mut words: Vec<String> = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        words.extend(hundreds_in_words(group).into_iter().map(String::from));
        let count = u128::from(group);
        match scale {
            0 => {}
            1 => words.push(plural(count, "tysiąc", "tysiące", "tysięcy").to_string()),
            n => {
                let name = SCALES.get(n - 2).copied().unwrap_or("kwadryliard");
                words.push(match plural_class(count) {
                    PluralClass::One => name.to_string(),
                    PluralClass::Few => format!("{name}y"),
                    PluralClass::Many => format!("{name}ów"),
                });
            }
        }
    }

    words.join(" ")
}

fn hundreds_in_words(value: u32) -> Vec<&'static str> {
    let mut words = Vec::with_capacity(3);
    let hundreds = (value / 100) as usize;
    let remainder = value % 100;

    if hundreds > 0 {
        words.push(HUNDREDS[hundreds]);
    }

    if (10..20).contains(&remainder) {
        words.push(TEENS[(remainder - 10) as usize]);
    } else {
        let tens = (remainder / 10) as usize;
        let units = (remainder % 10) as usize;
        if tens > 0 {
            words.push(TENS[tens]);
        }
        if units > 0 {
            words.push(UNITS[units]);
        }
    }

    words
}

enum PluralClass {
    One,
    Few,
    Many,
}

fn plural_class(n: u128) -> PluralClass {
    let last = n % 10;
    let last_two = n % 100;
    if n == 1 {
        PluralClass::One
    } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
        PluralClass::Few
    } else {
        PluralClass::Many
    }
}

fn plural<'a>(n: u128, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    match plural_class(n) {
        PluralClass::One => one,
        PluralClass::Few => few,
        PluralClass::Many => many,
    }
}

//! Static Darija wordbank.
//!
//! Moroccan Darija is far from standard Arabic: it mixes Arabic, French,
//! Spanish and Amazigh vocabulary, in two written registers. The Arabic
//! register uses Arabic script; the romanized register uses Latin letters
//! with digits standing in for phonemes the Latin alphabet lacks
//! (3=ع, 7=ح, 9=ق, 5=خ, 8=غ, 2=ء).
//!
//! Entries are grouped by category to ease maintenance, then merged into
//! the per-register lookup sets once at startup.
use std::collections::HashSet;

use lazy_static::lazy_static;

// greetings and everyday formulas
const GREETINGS: &[&str] = &[
    "كيداير",
    "كيدايرة",
    "كيدايرين",
    "لاباس",
    "لا باس",
    "بخير",
    "مزيان",
    "مزيانة",
    "حمدلله",
    "الحمد لله",
    "بسلامة",
    "تبارك الله",
    "صباح الخير",
    "مساء الخير",
    "تحياتي",
    "سلام",
    "السلام",
    "أهلا",
    "مرحبا",
    "الله يبارك",
    "الله يحفظك",
    "الله يعطيك الصحة",
    "الله يرحم الوالدين",
    "شكرا",
    "بارك الله فيك",
];

// pronouns, demonstratives, interrogatives and other grammar words
const GRAMMAR: &[&str] = &[
    "ديال",
    "ديالي",
    "ديالك",
    "ديالو",
    "ديالها",
    "ديالنا",
    "ديالكم",
    "ديالهم",
    "هاد",
    "هادي",
    "هادو",
    "هداك",
    "هديك",
    "فين",
    "فاين",
    "منين",
    "كيفاش",
    "علاش",
    "شحال",
    "شنو",
    "أشنو",
    "واش",
    "كاين",
    "كاينة",
    "كاينين",
    "ماشي",
    "والو",
    "حتى حاجة",
    "بزاف",
    "شوية",
    "قليل",
    "دابا",
    "دروك",
    "غادي",
    "غادية",
    "غاديين",
    "كان",
    "كانت",
    "كانو",
    "كيقول",
    "كتقول",
    "كيقولو",
    "كيدير",
    "كتدير",
    "كيديرو",
    "عندي",
    "عندك",
    "عندو",
    "عندها",
    "عندنا",
    "فيه",
    "فيها",
    "فيهم",
    "معايا",
    "معاك",
    "معاه",
    "معاها",
    "معانا",
    "بحال",
    "كيف",
    "كيفما",
    "يالله",
    "يلاه",
    "أجي",
    "خاص",
    "خاصني",
    "خاصك",
    "قبل",
    "بعد",
    "مورا",
];

const VERBS: &[&str] = &[
    "مشيت",
    "مشا",
    "مشات",
    "مشاو",
    "جيت",
    "جا",
    "جات",
    "جاو",
    "كليت",
    "كلا",
    "كلات",
    "شربت",
    "شرب",
    "شربات",
    "شفت",
    "شاف",
    "شافت",
    "شافو",
    "سمعت",
    "سمع",
    "سمعات",
    "قلت",
    "قال",
    "قالت",
    "قالو",
    "درت",
    "دار",
    "دارت",
    "دارو",
    "خدمت",
    "خدم",
    "خدمات",
    "لقيت",
    "لقا",
    "لقات",
    "بغيت",
    "بغا",
    "بغات",
    "بغاو",
    "عرفت",
    "عرف",
    "عرفات",
    "كتبت",
    "كتب",
    "كتبات",
    "قريت",
    "قرا",
    "قرات",
    "نعست",
    "نعس",
    "نعسات",
    "فاق",
    "فاقت",
    "فاقو",
    "طلع",
    "طلعت",
    "طلعو",
    "هبط",
    "هبطت",
    "هبطو",
    "وقف",
    "وقفت",
    "وقفو",
    "تسنا",
    "تسنيت",
    "تسناو",
    "خلا",
    "خليت",
    "خلاو",
    "عطا",
    "عطيت",
    "عطاو",
    "عطيني",
    "خدا",
    "خديت",
    "خداو",
    "ولا",
    "وليت",
    "ولاو",
    "بان",
    "بانت",
    "بانو",
    "حط",
    "حطيت",
    "حطو",
    "طيب",
    "طيبت",
    "طيبو",
    "صيفط",
    "صيفطت",
    "صيفطو",
    "تكلم",
    "تكلمت",
    "تكلمو",
    "ضحك",
    "ضحكت",
    "ضحكو",
    "بكا",
    "بكيت",
    "بكاو",
    "ركب",
    "ركبت",
    "ركبو",
];

const NOUNS: &[&str] = &[
    "خدمة",
    "خدما",
    "دار",
    "الدار",
    "مدرسة",
    "لقراية",
    "طوموبيل",
    "طونوبيل",
    "طوبيس",
    "كار",
    "تران",
    "لقطار",
    "فلوس",
    "دراهم",
    "لفلوس",
    "الماكلة",
    "لماكلة",
    "لخبز",
    "خبز",
    "أتاي",
    "اتاي",
    "لحليب",
    "حليب",
    "لما",
    "الماء",
    "لحوت",
    "حوت",
    "لحم",
    "خضرة",
    "لخضرة",
    "فاكية",
    "لفاكية",
    "سوق",
    "لمارشي",
    "حانوت",
    "لحانوت",
    "مول",
    "مولات",
    "ولد",
    "بنت",
    "ولاد",
    "رجل",
    "مرا",
    "عيالات",
    "صاحب",
    "صاحبة",
    "صحابي",
    "لخوي",
    "خويا",
    "خوتي",
    "لالة",
    "عمتي",
    "خالتي",
    "عمي",
    "خالي",
    "بابا",
    "يمّا",
    "ماما",
    "مغرب",
    "المغرب",
    "لمغريب",
    "كازا",
    "الرباط",
    "فاس",
    "مراكش",
    "طنجة",
    "أكادير",
    "حومة",
    "لحومة",
    "زنقة",
    "الزنقة",
    "بلاصة",
    "لبلاصة",
    "لعب",
    "الماتش",
    "كورة",
    "موسيقى",
    "أغنية",
    "شعبي",
];

const ADJECTIVES: &[&str] = &[
    "مليح",
    "مليحة",
    "مليحين",
    "خايب",
    "خايبة",
    "خايبين",
    "كبير",
    "كبيرة",
    "صغير",
    "صغيرة",
    "زوين",
    "زوينة",
    "زوينين",
    "مسخوط",
    "مسخوطة",
    "فرحان",
    "فرحانة",
    "فرحانين",
    "حزين",
    "حزينة",
    "عيان",
    "عيانة",
    "مريض",
    "مريضة",
    "ساخن",
    "بارد",
    "واعر",
    "واعرة",
    "حسن",
    "خير",
    "صعيب",
    "ساهل",
    "غالي",
    "رخيص",
    "جديد",
    "قديم",
    "نقي",
    "وسخ",
];

const EXPRESSIONS: &[&str] = &[
    "والله",
    "ولاه",
    "ولله",
    "بصح",
    "بالصح",
    "صافي",
    "سافي",
    "ياك",
    "واخا",
    "واخها",
    "هاكا",
    "هكا",
    "هكدا",
    "عافاك",
    "عفاك",
    "يا لطيف",
    "يا ربي",
    "ما عليه",
    "ماعليه",
    "عندك الحق",
    "حشومة",
    "عيب",
    "مسكين",
    "مسكينة",
    "دغيا",
    "شوف",
    "شوفي",
    "ما شاء الله",
    "إن شاء الله",
    "نشالله",
    "راه",
    "هاهو",
    "هاهي",
    "هاهم",
    "عاد",
    "باقي",
    "مازال",
    "خلاص",
    "سالينا",
    "زيد",
    "زيدي",
    "بركة",
    "بركا",
    "باراكا",
    "نتا",
    "نتي",
    "نتوما",
    "حنا",
    "هما",
];

// romanized register, digits standing in for Arabic phonemes
const ROMANIZED: &[&str] = &[
    "salam",
    "slm",
    "labas",
    "la bas",
    "bikhir",
    "hamdullah",
    "hamdlah",
    "bslama",
    "bsalama",
    "sbah lkhir",
    "msa lkhir",
    "wach",
    "wsh",
    "kifash",
    "ki dayra",
    "ki dayr",
    "kidayr",
    "kidayra",
    "wakha",
    "wkha",
    "iyeh",
    "la2",
    "yak",
    "yaak",
    "bzaf",
    "bzzaf",
    "chwiya",
    "chway",
    "daba",
    "drk",
    "drok",
    "dork",
    "3lach",
    "3lash",
    "fach",
    "fin",
    "mnin",
    "chno",
    "achno",
    "chhal",
    "machi",
    "walo",
    "walou",
    "hta haja",
    "3afak",
    "3fak",
    "allah y3tik sa7a",
    "allah ybarek",
    "tbarkallah",
    "tbark llah",
    "mashallah",
    "mchallah",
    "inchallah",
    "nchallah",
    "nchalah",
    "wallah",
    "wlah",
    "wllah",
    "bsa7",
    "bssa7",
    "safi",
    "khalas",
    "7chouma",
    "hchouma",
    "3ib",
    "meskine",
    "mskin",
    "mskina",
    "dghya",
    "dghiya",
    "chouf",
    "choufi",
    "zid",
    "zidi",
    "barka",
    "baraka",
    "braka",
    "khoya",
    "khouya",
    "khouti",
    "khti",
    "khtiti",
    "sahbi",
    "sa7bi",
    "sa7bti",
    "moul",
    "mul",
    "lmoul",
    "dar",
    "ldar",
    "khdma",
    "lkhdma",
    "flouss",
    "flous",
    "drahem",
    "tomobil",
    "tonobil",
    "tobis",
    "lkar",
    "atay",
    "l7lib",
    "lma",
    "lkhobz",
    "makla",
    "so9",
    "lmarchi",
    "7anout",
    "l7anout",
    "weld",
    "bent",
    "wlad",
    "lbnat",
    "rajel",
    "mra",
    "baba",
    "yemma",
    "lmghrib",
    "maghrib",
    "casa",
    "kaza",
    "rabat",
    "fas",
    "marrakech",
    "tanja",
    "agadir",
    "7ouma",
    "l7ouma",
    "zan9a",
    "kora",
    "mchit",
    "mcha",
    "mchat",
    "mchaw",
    "jit",
    "ja",
    "jat",
    "jaw",
    "klit",
    "kla",
    "klat",
    "chrbt",
    "chrb",
    "chft",
    "chaf",
    "chafat",
    "chafo",
    "sm3t",
    "sm3",
    "sm3at",
    "glt",
    "gal",
    "galat",
    "galo",
    "drt",
    "darat",
    "daro",
    "khdmt",
    "khdm",
    "l9it",
    "l9a",
    "l9at",
    "bghit",
    "bgha",
    "bghat",
    "bghaw",
    "3rft",
    "3rf",
    "ktbt",
    "ktb",
    "9rit",
    "9ra",
    "9rat",
    "n3st",
    "n3s",
    "ta3",
    "ta3i",
    "ta3k",
    "ta3o",
    "ta3ha",
    "ta3na",
    "mli7",
    "mli7a",
    "zwin",
    "zwina",
    "zwnin",
    "khayb",
    "khayba",
    "fr7an",
    "fr7ana",
    "7zin",
    "7zina",
    "3yan",
    "3yana",
    "wa3r",
    "wa3ra",
    "s3ib",
    "sahel",
    "ghali",
    "rkhis",
    "jdid",
    "9dim",
];

lazy_static! {
    /// Arabic-script register, all categories merged.
    pub static ref ARABIC: HashSet<&'static str> = GREETINGS
        .iter()
        .chain(GRAMMAR)
        .chain(VERBS)
        .chain(NOUNS)
        .chain(ADJECTIVES)
        .chain(EXPRESSIONS)
        .copied()
        .collect();

    /// Romanized register. All entries are stored lowercase.
    pub static ref LATIN: HashSet<&'static str> = ROMANIZED.iter().copied().collect();

    /// Arabic-register entries long enough to be matched as substrings,
    /// covering multi-word expressions that cross token boundaries.
    pub static ref ARABIC_SUBSTRINGS: Vec<&'static str> = ARABIC
        .iter()
        .filter(|w| w.chars().count() > 3)
        .copied()
        .collect();

    /// Romanized counterpart, matched against lowercased text.
    pub static ref LATIN_SUBSTRINGS: Vec<&'static str> = LATIN
        .iter()
        .filter(|w| w.chars().count() > 3)
        .copied()
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_populated() {
        assert!(ARABIC.len() > 300);
        assert!(LATIN.len() > 150);
    }

    #[test]
    fn no_uppercase_in_romanized_register() {
        assert!(LATIN.iter().all(|w| !w.chars().any(|c| c.is_uppercase())));
    }

    #[test]
    fn substring_lists_exclude_short_entries() {
        assert!(ARABIC_SUBSTRINGS.iter().all(|w| w.chars().count() > 3));
        assert!(LATIN_SUBSTRINGS.iter().all(|w| w.chars().count() > 3));
        assert!(ARABIC_SUBSTRINGS.contains(&"والله"));
    }
}

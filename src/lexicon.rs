//! Static lexical tables: word lists, full-word annotations, lemma and POS overrides.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

pub const PLURAL_INVARIABLE_NOUNS: &[&str] = &[
    "boby", "brýle", "brejle", "dveře", "dvířka", "jesličky", "hodiny", "hodinky", "kalhoty",
    "kalhotky", "kamna", "korále", "kraťasy", "narozeniny", "nůžky", "peníze", "plavky", "slipy",
    "šaty", "šatičky", "vrata", "záda", "hory", "halušky", "housle", "housličky", "játra",
    "kleště", "kraťásky", "legíny", "legínky", "mluvidla", "narozky", "neštovice", "nosítka",
    "noviny", "nudle", "nůžtičky", "plíce", "povidla", "saně", "sáně", "sáňky", "spalničky",
    "spodky", "štípačky", "svršky", "šunkofleky", "štafle", "vnitřnosti", "tepláky", "zarděnky",
];

pub const PLURAL_INVARIABLE_PROPER_NOUNS: &[&str] =
    &["Prčice", "Velikonoce", "Vánoce", "Vary", "Vršovice", "Krkonoše"];

pub const MODAL_VERBS: &[&str] = &["moci", "muset", "smět"];

pub const PRONOMINAL_ADVERBS: &[&str] = &[
    "dokdy", "dokud", "jak", "jakkoli", "jakkoliv", "jakpak", "jaksi", "kam", "kamkoli",
    "kamkoliv", "kampak", "kamsi", "kde", "kdekoli", "kdekoliv", "kdepak", "kdesi", "kdy",
    "kdykoli", "kdykoliv", "kdypak", "kdysi", "kudy", "kudykoli", "kudykoliv", "kudypak",
    "kudysi", "nač", "načež", "nakdy", "nakolik", "nato", "navždy", "nějak", "někam", "někde",
    "někdy", "nyní", "odevšud", "odevšad", "odkdy", "odkdykoli", "odkdykoliv", "odkdypak",
    "odkdysi", "odkud", "odkudkoli", "odkudkoliv", "odkudpak", "odkudsi", "odsud", "odtamtud",
    "odtud", "onde", "onehdy", "pak", "pokud", "poté", "proč", "pročež", "sem", "semka",
    "semhle", "tady", "tadyhle", "tadyhletudy", "tadytudy", "takhle", "takto", "tam", "tamhle",
    "támhle", "tamtudy", "tamhletudy", "teď", "teďka", "tehdy", "tenkrát", "tenkráte", "tolik",
    "tolikrát", "tudy", "tudyhle", "tuhle", "tuhletudy", "všude", "vždy", "začež", "zde",
];

pub const NEGATIVE_PRONOMINAL_ADVERBS: &[&str] =
    &["nikde", "nikam", "nikudy", "nikdy", "nijak", "nikterak", "odnikud"];

/// Possessive pronoun forms. The first form of each list is the lemma of the whole list.
pub const POSS_PRONOUN_F_3SG: &[&str] =
    &["její", "jejího", "jejímu", "jejím", "jejích", "jejími", "jejíma"];
pub const POSS_PRONOUN_M_N_3SG: &[&str] = &["jeho"];
pub const POSS_PRONOUN_3PL: &[&str] = &["jejich"];

/// Whole-line contents which never get a `%mor` tier.
pub const SKIP_LINES: &[&str] = &[
    ".", "0 .", "+/.", "+...", "!", "?", "nee .", "ne .", "emem .",
];

/// Inanimate pronouns, always neuter.
pub const NEUTER_PRONOUN_LEMMAS: &[&str] = &["co", "něco", "nic"];
/// Animate pronouns, always masculine.
pub const MASCULINE_PRONOUN_LEMMAS: &[&str] =
    &["kdo", "někdo", "nikdo", "kdokoli", "kdokoliv", "kdosi", "kdopak"];
/// Always singular.
pub const SINGULAR_LEMMAS: &[&str] = &[
    "kdo", "co", "něco", "nic", "někdo", "nikdo", "kdokoli", "kdokoliv", "kdosi", "kdopak", "se",
];
/// Personal pronouns without grammatical gender.
pub const GENDERLESS_LEMMAS: &[&str] = &["já", "my", "ty", "vy", "se"];

/// POS label override of one lemma: a default and labels for individual word forms.
#[derive(Debug, Clone)]
pub struct PosOverride {
    default: &'static str,
    by_word: HashMap<&'static str, &'static str>,
}

impl PosOverride {
    fn new(default: &'static str) -> Self {
        PosOverride {
            default,
            by_word: HashMap::new(),
        }
    }

    fn with_words(mut self, words: &[&'static str], label: &'static str) -> Self {
        self.by_word.extend(words.iter().map(|word| (*word, label)));
        self
    }

    /// The label for the given word form.
    pub fn label(&self, word: &str) -> &'static str {
        self.by_word.get(word).copied().unwrap_or(self.default)
    }

    /// The label for the given word form if it is overridden individually.
    pub fn word_label(&self, word: &str) -> Option<&'static str> {
        self.by_word.get(word).copied()
    }
}

const COPULA_FORMS: &[&str] = &[
    "je", "jsou", "seš", "nejsem", "nejsi", "není", "nejsme", "nejste", "nejsou", "buď", "buďme",
    "buďte", "nebuď", "nebuďme", "nebuďte", "být", "nebýt", "byl", "byla", "bylo", "byli",
    "byly", "nebyl", "nebyla", "nebylo", "nebyli", "nebyly",
];

fn compdeg_overrides() -> IndexMap<&'static str, &'static str> {
    let groups: &[(&str, &[&str])] = &[
        ("dobrý", &["lepší", "nejlepší"]),
        ("špatný", &["horší", "nejhorší"]),
        ("dlouhý", &["delší", "nejdelší"]),
        ("malý", &["menší", "nejmenší"]),
        ("velký", &["větší", "největší"]),
        ("dobře", &["lépe", "líp", "nejlépe", "nejlíp"]),
        ("špatně", &["hůře", "hůř", "nejhůře", "nejhůř"]),
        (
            "brzy",
            &["dříve", "dřív", "dřívěji", "dřívějc", "nejdříve", "nejdřív", "nejdřívěji", "nejdřívějc"],
        ),
        ("dlouho", &["déle", "dýl", "nejdéle", "nejdýl"]),
        ("vysoko", &["výše", "výš", "vejš", "nejvýše", "nejvýš", "nejvejš"]),
        ("málo", &["méně", "míň", "nejméně", "nejmíň"]),
        ("hodně", &["více", "víc", "nejvíce", "nejvíc"]),
        ("těžce", &["tíž", "tíže", "tížeji", "nejtíž", "nejtíže", "nejtížeji"]),
        (
            "snadno",
            &["snáz", "snáze", "snázeji", "snadněji", "snadnějc", "nejsnáz", "nejsnáze", "nejsnadněji", "nejsnadnějc"],
        ),
        (
            "hluboko",
            &["hloub", "hlouběji", "hloubějc", "nejhloub", "nejhlouběji", "nejhloubějc"],
        ),
        (
            "široko",
            &["šíře", "šíř", "šířeji", "šířejc", "nejšíře", "nejšíř", "nejšířeji", "nejšířejc"],
        ),
        ("úzce", &["úže", "úžeji", "úžejc", "nejúže", "nejúžeji", "nejúžejc"]),
    ];

    groups
        .iter()
        .flat_map(|(lemma, forms)| forms.iter().map(move |form| (*form, *lemma)))
        .collect()
}

lazy_static! {
    /// Word forms whose complete annotation is fixed.
    pub static ref MOR_WORD_OVERRIDES: IndexMap<&'static str, &'static str> = vec![
        ("mami", "n|máma-5&SG&F"),
        ("koukej", "v|koukat-2&SG&imp&akt&impf"),
        ("zzz", "x|zzz"),
        ("rád", "adj:short|rád-1&SG&M"),
        ("ráda", "adj:short|rád-1&SG&F"),
        ("rádo", "adj:short|rád-1&SG&N"),
        ("rádi", "adj:short|rád-1&PL&M"),
        ("rády", "adj:short|rád-1&PL&F"),
        ("se", "pro:refl|se-4&SG"),
        ("si", "pro:refl|se-3&SG"),
        ("jejichž", "pro:rel:poss|jejichž-x_pad&x_cislo&x_jmenny_rod"),
        // MorfFlex does not assign person and number to conditional auxiliaries
        ("bych", "v:aux|být-1&SG&cond&akt&impf"),
        ("bysem", "v:aux|být-1&SG&cond&akt&impf"),
        ("bys", "v:aux|být-2&SG&cond&akt&impf"),
        ("bysi", "v:aux|být-2&SG&cond&akt&impf"),
        ("by", "v:aux|být-3&x_cislo&cond&akt&impf"),
        ("bychom", "v:aux|být-1&PL&cond&akt&impf"),
        ("bysme", "v:aux|být-1&PL&cond&akt&impf"),
        ("byste", "v:aux|být-2&PL&cond&akt&impf"),
        ("abych", "conj:sub_v:aux|aby_být-1&SG&cond&akt&impf"),
        ("abysem", "conj:sub_v:aux|aby_být-1&SG&cond&akt&impf"),
        ("abys", "conj:sub_v:aux|aby_být-2&SG&cond&akt&impf"),
        ("abysi", "conj:sub_v:aux|aby_být-2&SG&cond&akt&impf"),
        ("aby", "conj:sub_v:aux|aby_být-3&x_cislo&cond&akt&impf"),
        ("abychom", "conj:sub_v:aux|aby_být-1&PL&cond&akt&impf"),
        ("abyste", "conj:sub_v:aux|aby_být-2&PL&cond&akt&impf"),
        ("abysme", "conj:sub_v:aux|aby_být-1&PL&cond&akt&impf"),
        ("kdybych", "conj:sub_v:aux|kdyby_být-1&SG&cond&akt&impf"),
        ("kdybysem", "conj:sub_v:aux|kdyby_být-1&SG&cond&akt&impf"),
        ("kdybys", "conj:sub_v:aux|kdyby_být-2&SG&cond&akt&impf"),
        ("kdybysi", "conj:sub_v:aux|kdyby_být-2&SG&cond&akt&impf"),
        ("kdyby", "conj:sub_v:aux|kdyby_být-3&x_cislo&cond&akt&impf"),
        ("kdybychom", "conj:sub_v:aux|kdyby_být-1&PL&cond&akt&impf"),
        ("kdybysme", "conj:sub_v:aux|kdyby_být-1&PL&cond&akt&impf"),
        ("kdybyste", "conj:sub_v:aux|kdyby_být-2&PL&cond&akt&impf"),
        ("ses", "pro:refl_v:aux|se_být-4&SG_2&SG&ind&pres&akt&impf"),
        ("sis", "pro:refl_v:aux|se_být-3&SG_2&SG&ind&pres&akt&impf"),
        ("zač", "prep_pro:int|za_co-4&SG&N"),
        ("nač", "prep_pro:int|na_co-4&SG&N"),
        ("oč", "prep_pro:int|o_co-4&SG&N"),
        // tagged as a subordinating conjunction by MorphoDiTa
        ("li", "part|li"),
        ("emem", "int|emem"),
        // lemmatized as "hat" with the guesser on
        ("hají", "int|hají"),
    ]
    .into_iter()
    .collect();

    /// Comparative and superlative forms, lemmatized to the positive.
    pub static ref COMPDEG_LEMMA_OVERRIDES: IndexMap<&'static str, &'static str> =
        compdeg_overrides();

    /// Tagger lemma to target lemma.
    pub static ref LEMMA_OVERRIDES: IndexMap<&'static str, &'static str> = {
        let mut map: IndexMap<_, _> = vec![("lidé", "člověk")].into_iter().collect();
        map.extend(COMPDEG_LEMMA_OVERRIDES.iter().map(|(k, v)| (*k, *v)));
        map
    };

    /// Word form to target lemma. Takes precedence over [LEMMA_OVERRIDES].
    pub static ref WORD_LEMMA_OVERRIDES: IndexMap<&'static str, &'static str> = {
        let mut map = IndexMap::new();
        for forms in &[POSS_PRONOUN_3PL, POSS_PRONOUN_M_N_3SG, POSS_PRONOUN_F_3SG] {
            for form in forms.iter() {
                map.insert(*form, forms[0]);
            }
        }
        map.insert("zem", "zem");
        map
    };

    /// Lemma to POS label override.
    pub static ref POS_OVERRIDES: HashMap<&'static str, PosOverride> = {
        let mut map = HashMap::new();

        for lemma in PRONOMINAL_ADVERBS {
            map.insert(*lemma, PosOverride::new("adv:pro"));
        }
        for lemma in NEGATIVE_PRONOMINAL_ADVERBS {
            map.insert(*lemma, PosOverride::new("adv:pro:neg"));
        }
        for lemma in PLURAL_INVARIABLE_NOUNS.iter().chain(PLURAL_INVARIABLE_PROPER_NOUNS) {
            map.insert(*lemma, PosOverride::new("n:pt"));
        }
        for lemma in MODAL_VERBS {
            map.insert(*lemma, PosOverride::new("v:mod"));
        }

        map.insert("každý", PosOverride::new("pro:indef"));
        map.insert("svůj", PosOverride::new("pro:refl:poss"));
        map.insert("čí", PosOverride::new("pro:int:poss"));
        map.insert("být", PosOverride::new("v:x").with_words(COPULA_FORMS, "v:cop"));
        map.insert("chtít", PosOverride::new("v:x"));
        map.insert("mít", PosOverride::new("v:x"));

        map
    };

    static ref SKIP_LINE_SET: HashSet<&'static str> = SKIP_LINES.iter().copied().collect();
}

/// Whether a normalized line is on the skip list.
pub fn is_skip_line(plain_text: &str) -> bool {
    SKIP_LINE_SET.contains(plain_text)
}

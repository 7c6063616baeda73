//! Built-in vocabularies that ship with the binary rather than as CSV tables.

use crate::parsing::segmenter::SectionKind;

/// Degree abbreviations, compared against upper-cased words.
pub const DEGREE_ABBREVIATIONS: &[&str] = &[
    "BE", "B.E.", "B.E", "BS", "B.S", "B.S.", "BACHELOR", "ME", "M.E", "MS", "M.S", "M.S.",
    "BTECH", "MTECH", "MASTER", "PHD", "PH.D", "PH.D.", "MD", "M.D.", "M.D", "DOCTOR", "SSC",
    "HSC", "CBSE", "ICSE", "X", "XII",
];

/// Heading words and the section each one opens.
pub const SECTION_HEADINGS: &[(&str, SectionKind)] = &[
    ("accomplishments", SectionKind::other("accomplishments")),
    ("education", SectionKind::Education),
    ("employment", SectionKind::Experience),
    ("experience", SectionKind::Experience),
    ("interests", SectionKind::other("interests")),
    ("projects", SectionKind::other("projects")),
    ("profile", SectionKind::Profile),
    ("publications", SectionKind::other("publications")),
    ("skills", SectionKind::Skills),
    ("certifications", SectionKind::other("certifications")),
    ("objective", SectionKind::other("objective")),
    ("summary", SectionKind::Profile),
    ("introduction", SectionKind::Profile),
];

/// English stop words (lower-case).
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "ca", "can", "cannot", "could", "did", "do", "does", "doing",
    "done", "down", "due", "during", "each", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers", "herself",
    "him", "himself", "his", "how", "however", "hundred", "i", "if", "in", "indeed", "into",
    "is", "it", "its", "itself", "just", "keep", "last", "latter", "latterly", "least", "less",
    "made", "make", "many", "may", "me", "meanwhile", "might", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "quite", "rather", "re", "really", "regarding",
    "same", "say", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she",
    "should", "show", "side", "since", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top",
    "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until", "up", "upon",
    "us", "used", "using", "various", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without", "would",
    "yet", "you", "your", "yours", "yourself", "yourselves",
];

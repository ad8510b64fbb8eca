//! KaTeX command tables
//!
//! Names are listed without the leading backslash and grouped the way the
//! KaTeX function reference groups them. The trailing digit of each group
//! name is the number of brace arguments the command takes. Groups overlap
//! in places; the catalog deduplicates.

pub const DELIMITERS_0: &[&str] = &[
    "lparen", "rparen", "lceil", "rceil", "uparrow", "lbrack", "rbrack", "lfloor", "rfloor",
    "downarrow", "lbrace", "rbrace", "lmoustache", "rmoustache", "updownarrow", "langle",
    "rangle", "lgroup", "rgroup", "Uparrow", "vert", "ulcorner", "urcorner", "Downarrow", "Vert",
    "llcorner", "lrcorner", "Updownarrow", "lvert", "rvert", "lVert", "rVert", "backslash",
    "lang", "rang", "lt", "gt", "llbracket", "rrbracket", "lBrace", "rBrace",
];

pub const DELIMITER_SIZING_0: &[&str] = &[
    "left", "big", "bigl", "bigm", "bigr", "middle", "Big", "Bigl", "Bigm", "Bigr", "right",
    "bigg", "biggl", "biggm", "biggr", "Bigg", "Biggl", "Biggm", "Biggr",
];

pub const GREEK_LETTERS_0: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
    "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi", "Chi",
    "Psi", "Omega", "varGamma", "varDelta", "varTheta", "varLambda", "varXi", "varPi",
    "varSigma", "varUpsilon", "varPhi", "varPsi", "varOmega", "alpha", "beta", "gamma", "delta",
    "epsilon", "zeta", "eta", "theta", "iota", "kappa", "lambda", "mu", "nu", "xi", "omicron",
    "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi", "omega", "varepsilon",
    "varkappa", "vartheta", "thetasym", "varpi", "varrho", "varsigma", "varphi", "digamma",
];

pub const OTHER_LETTERS_0: &[&str] = &[
    "imath", "nabla", "Im", "Reals", "jmath", "partial", "image", "wp", "aleph", "Game", "Bbbk",
    "weierp", "alef", "Finv", "N", "Z", "alefsym", "cnums", "natnums", "beth", "Complex", "R",
    "gimel", "ell", "Re", "daleth", "hbar", "real", "eth", "hslash", "reals",
];

pub const ANNOTATION_1: &[&str] = &["cancel", "overbrace", "bcancel", "underbrace", "xcancel", "sout", "boxed", "not", "tag"];

pub const VERTICAL_LAYOUT_0: &[&str] = &["atop"];
pub const VERTICAL_LAYOUT_1: &[&str] = &["raisebox"];
pub const VERTICAL_LAYOUT_2: &[&str] = &["stackrel", "overset", "underset", "substack"];

pub const OVERLAP_1: &[&str] = &["mathllap", "mathrlap", "mathclap", "llap", "rlap", "clap", "smash"];

pub const SPACING_0: &[&str] = &[
    "thinspace", "medspace", "thickspace", "enspace", "quad", "qquad", "negthinspace",
    "negmedspace", "nobreakspace", "negthickspace", "space", "mathstrut",
];
pub const SPACING_1: &[&str] = &["kern", "mkern", "mskip", "hskip", "hspace", "hspace*", "phantom", "hphantom", "vphantom"];

pub const LOGIC_AND_SET_THEORY_0: &[&str] = &[
    "forall", "complement", "therefore", "emptyset", "exists", "subset", "because", "empty",
    "exist", "supset", "mapsto", "varnothing", "nexists", "mid", "to", "implies", "in", "land",
    "gets", "impliedby", "isin", "lor", "leftrightarrow", "iff", "notin", "ni", "notni", "neg",
    "lnot",
];
pub const LOGIC_AND_SET_THEORY_1: &[&str] = &["Set", "set"];

pub const MACROS_0: &[&str] = &["def", "gdef", "edef", "xdef", "let", "futurelet", "global", "newcommand", "renewcommand", "providecommand"];

pub const BIG_OPERATORS_0: &[&str] = &[
    "sum", "prod", "bigotimes", "bigvee", "int", "coprod", "bigoplus", "bigwedge", "iint",
    "intop", "bigodot", "bigcap", "iiint", "smallint", "biguplus", "bigcup", "oint", "oiint",
    "oiiint", "bigsqcup",
];

pub const BINARY_OPERATORS_0: &[&str] = &[
    "cdot", "gtrdot", "cdotp", "intercal", "centerdot", "land", "rhd", "circ", "leftthreetimes",
    "rightthreetimes", "amalg", "circledast", "ldotp", "rtimes", "And", "circledcirc", "lor",
    "setminus", "ast", "circleddash", "lessdot", "smallsetminus", "barwedge", "Cup", "lhd",
    "sqcap", "bigcirc", "cup", "ltimes", "sqcup", "bmod", "curlyvee", "mod", "times", "boxdot",
    "curlywedge", "mp", "unlhd", "boxminus", "div", "odot", "unrhd", "boxplus", "divideontimes",
    "ominus", "uplus", "boxtimes", "dotplus", "oplus", "vee", "bullet", "doublebarwedge",
    "otimes", "veebar", "Cap", "doublecap", "oslash", "wedge", "cap", "doublecup", "pm",
    "plusmn", "wr",
];

pub const BINOMIAL_COEFFICIENTS_0: &[&str] = &["choose"];
pub const BINOMIAL_COEFFICIENTS_2: &[&str] = &["binom", "dbinom", "tbinom", "brace", "brack"];

pub const FRACTIONS_0: &[&str] = &["over", "above"];
pub const FRACTIONS_2: &[&str] = &["frac", "dfrac", "tfrac", "cfrac", "genfrac"];

pub const MATH_OPERATORS_0: &[&str] = &[
    "arcsin", "cotg", "ln", "det", "arccos", "coth", "log", "gcd", "arctan", "csc", "sec", "inf",
    "arctg", "ctg", "sin", "lim", "arcctg", "cth", "sinh", "liminf", "arg", "deg", "sh", "limsup",
    "ch", "dim", "tan", "max", "cos", "exp", "tanh", "min", "cosec", "hom", "tg", "Pr", "cosh",
    "ker", "th", "sup", "cot", "lg", "argmax", "argmin", "limits", "nolimits",
];
pub const MATH_OPERATORS_1: &[&str] = &["operatorname", "operatorname*", "operatornamewithlimits"];

pub const SQRT_1: &[&str] = &["sqrt"];

pub const RELATIONS_0: &[&str] = &[
    "eqcirc", "lesseqgtr", "sqsupset", "approx", "eqcolon", "lesseqqgtr", "sqsupseteq",
    "approxeq", "Eqcolon", "lessgtr", "Subset", "asymp", "eqqcolon", "lesssim", "subset",
    "backepsilon", "Eqqcolon", "ll", "subseteq", "sube", "backsim", "eqsim", "lll", "subseteqq",
    "backsimeq", "eqslantgtr", "llless", "succ", "between", "eqslantless", "lt", "succapprox",
    "bowtie", "equiv", "mid", "succcurlyeq", "bumpeq", "fallingdotseq", "models", "succeq",
    "Bumpeq", "frown", "multimap", "succsim", "circeq", "ge", "owns", "Supset", "colonapprox",
    "geq", "parallel", "supset", "Colonapprox", "geqq", "perp", "supseteq", "coloneq",
    "geqslant", "pitchfork", "supseteqq", "Coloneq", "gg", "prec", "thickapprox", "coloneqq",
    "ggg", "precapprox", "thicksim", "Coloneqq", "gggtr", "preccurlyeq", "trianglelefteq",
    "colonsim", "gt", "preceq", "triangleq", "Colonsim", "gtrapprox", "precsim",
    "trianglerighteq", "cong", "gtreqless", "propto", "varpropto", "curlyeqprec", "gtreqqless",
    "risingdotseq", "vartriangle", "curlyeqsucc", "gtrless", "shortmid", "vartriangleleft",
    "dashv", "gtrsim", "shortparallel", "vartriangleright", "dblcolon", "in", "sim",
    "vcentcolon", "doteq", "Join", "simeq", "vdash", "Doteq", "le", "smallfrown", "vDash",
    "doteqdot", "leq", "smallsmile", "Vdash", "leqq", "smile", "Vvdash", "leqslant", "sqsubset",
    "lessapprox", "sqsubseteq", "lessdot", "ne", "neq",
];

pub const NEGATED_RELATIONS_0: &[&str] = &[
    "gnapprox", "ngeqslant", "nsubseteq", "precneqq", "gneq", "ngtr", "nsubseteqq", "precnsim",
    "gneqq", "nleq", "nsucc", "subsetneq", "gnsim", "nleqq", "nsucceq", "subsetneqq", "gvertneqq",
    "nleqslant", "nsupseteq", "succnapprox", "lnapprox", "nless", "nsupseteqq", "succneqq",
    "lneq", "nmid", "ntriangleleft", "succnsim", "lneqq", "notin", "ntrianglelefteq",
    "supsetneq", "lnsim", "ntriangleright", "supsetneqq", "lvertneqq", "nparallel",
    "ntrianglerighteq", "varsubsetneq", "ncong", "nprec", "nvdash", "varsubsetneqq", "nshortmid",
    "npreceq", "nvDash", "varsupsetneq", "ngeq", "nshortparallel", "nVDash", "varsupsetneqq",
    "ngeqq", "nsim", "nVdash", "precnapprox",
];

pub const ARROWS_0: &[&str] = &[
    "circlearrowleft", "leftharpoonup", "rArr", "circlearrowright", "leftleftarrows",
    "rarr", "curvearrowleft", "leftrightarrow", "restriction", "curvearrowright",
    "Leftrightarrow", "rightarrow", "Darr", "leftrightarrows", "Rightarrow", "dArr",
    "leftrightharpoons", "rightarrowtail", "darr", "leftrightsquigarrow", "rightharpoondown",
    "dashleftarrow", "Lleftarrow", "rightharpoonup", "dashrightarrow", "longleftarrow",
    "rightleftarrows", "downarrow", "Longleftarrow", "rightleftharpoons", "Downarrow",
    "longleftrightarrow", "rightrightarrows", "downdownarrows", "Longleftrightarrow",
    "rightsquigarrow", "downharpoonleft", "longmapsto", "Rrightarrow", "downharpoonright",
    "longrightarrow", "Rsh", "gets", "Longrightarrow", "searrow", "Harr", "looparrowleft",
    "swarrow", "hArr", "looparrowright", "to", "harr", "Lrarr", "twoheadleftarrow",
    "hookleftarrow", "lrArr", "twoheadrightarrow", "hookrightarrow", "lrarr", "Uarr", "iff",
    "Lsh", "uArr", "impliedby", "mapsto", "uarr", "implies", "nearrow", "uparrow", "Larr",
    "nleftarrow", "Uparrow", "lArr", "nLeftarrow", "updownarrow", "larr", "nleftrightarrow",
    "Updownarrow", "leadsto", "nLeftrightarrow", "upharpoonleft", "leftarrow", "nrightarrow",
    "upharpoonright", "Leftarrow", "nRightarrow", "upuparrows", "leftarrowtail", "nwarrow",
    "leftharpoondown", "Rarr",
];

pub const EXTENSIBLE_ARROWS_1: &[&str] = &[
    "xleftarrow", "xrightarrow", "xLeftarrow", "xRightarrow", "xleftrightarrow",
    "xLeftrightarrow", "xhookleftarrow", "xhookrightarrow", "xtwoheadleftarrow",
    "xtwoheadrightarrow", "xleftharpoonup", "xrightharpoonup", "xleftharpoondown",
    "xrightharpoondown", "xleftrightharpoons", "xrightleftharpoons", "xtofrom", "xmapsto",
    "xlongequal",
];

pub const BRAKET_NOTATION_1: &[&str] = &["bra", "Bra", "ket", "Ket", "braket", "Braket"];

pub const CLASS_ASSIGNMENT_1: &[&str] = &["mathbin", "mathclose", "mathinner", "mathop", "mathopen", "mathord", "mathpunct", "mathrel"];

pub const COLOR_2: &[&str] = &["color", "textcolor", "colorbox"];

pub const FONT_0: &[&str] = &["rm", "bf", "it", "sf", "tt"];
pub const FONT_1: &[&str] = &[
    "mathrm", "mathbf", "mathit", "mathnormal", "textbf", "textit", "textrm", "bold",
    "Bbb", "textnormal", "boldsymbol", "mathbb", "text", "bm", "frak", "mathsf", "mathtt",
    "mathfrak", "textsf", "texttt", "mathcal", "mathscr", "pmb",
];

pub const SIZE_0: &[&str] = &["Huge", "huge", "LARGE", "Large", "large", "normalsize", "small", "footnotesize", "scriptsize", "tiny"];

pub const STYLE_0: &[&str] = &["displaystyle", "textstyle", "scriptstyle", "scriptscriptstyle", "limits", "nolimits", "verb"];

pub const SYMBOLS_AND_PUNCTUATION_0: &[&str] = &[
    "cdots", "LaTeX", "ddots", "TeX", "ldots", "nabla", "vdots", "infty", "dotsb", "infin",
    "dotsc", "checkmark", "dotsi", "dag", "dotsm", "dagger", "dotso", "sdot", "ddag", "mathellipsis",
    "ddagger", "Box", "Dagger", "lq", "square", "angle", "blacksquare", "measuredangle", "rq",
    "triangle", "sphericalangle", "triangledown", "top", "triangleleft", "bot",
    "triangleright", "colon", "bigtriangledown", "backprime", "bigtriangleup", "pounds", "prime",
    "blacktriangle", "mathsterling", "blacktriangledown", "blacktriangleleft", "yen",
    "blacktriangleright", "surd", "diamond", "degree", "Diamond", "lozenge", "mho",
    "blacklozenge", "diagdown", "star", "diagup", "bigstar", "flat", "clubsuit", "natural",
    "copyright", "clubs", "sharp", "circledR", "diamondsuit", "heartsuit", "diamonds", "hearts",
    "circledS", "spadesuit", "spades", "maltese", "minuso",
];

pub const DEBUGGING_0: &[&str] = &["message", "errmessage", "show"];

pub const ACCENTS_1: &[&str] = &[
    "tilde", "mathring", "widetilde", "overgroup", "utilde", "undergroup", "acute", "vec",
    "Overrightarrow", "bar", "overleftarrow", "overrightarrow", "breve", "underleftarrow",
    "underrightarrow", "check", "overleftharpoon", "overrightharpoon", "dot", "overleftrightarrow",
    "overbrace", "ddot", "underleftrightarrow", "underbrace", "grave", "overline",
    "overlinesegment", "hat", "underline", "underlinesegment", "widehat", "widecheck",
    "underbar",
];

/// Environments offered by the `\begin` snippet
pub const ENVS: &[&str] = &[
    "align", "align*", "aligned", "alignat", "alignat*", "alignedat", "array", "Bmatrix",
    "bmatrix", "cases", "CD", "darray", "dcases", "equation", "equation*", "gather", "gather*",
    "gathered", "matrix", "pmatrix", "rcases", "smallmatrix", "split", "Vmatrix", "vmatrix",
];

/// Commands taking no brace argument
pub const ARITY_0_GROUPS: &[&[&str]] = &[
    DELIMITERS_0, DELIMITER_SIZING_0, GREEK_LETTERS_0, OTHER_LETTERS_0, SPACING_0,
    VERTICAL_LAYOUT_0, LOGIC_AND_SET_THEORY_0, MACROS_0, BIG_OPERATORS_0, BINARY_OPERATORS_0,
    BINOMIAL_COEFFICIENTS_0, FRACTIONS_0, MATH_OPERATORS_0, RELATIONS_0, NEGATED_RELATIONS_0,
    ARROWS_0, FONT_0, SIZE_0, STYLE_0, SYMBOLS_AND_PUNCTUATION_0, DEBUGGING_0,
];

/// Commands taking one brace argument
pub const ARITY_1_GROUPS: &[&[&str]] = &[
    ACCENTS_1, ANNOTATION_1, VERTICAL_LAYOUT_1, OVERLAP_1, SPACING_1, LOGIC_AND_SET_THEORY_1,
    MATH_OPERATORS_1, SQRT_1, EXTENSIBLE_ARROWS_1, FONT_1, BRAKET_NOTATION_1, CLASS_ASSIGNMENT_1,
];

/// Commands taking two brace arguments
pub const ARITY_2_GROUPS: &[&[&str]] = &[VERTICAL_LAYOUT_2, BINOMIAL_COEFFICIENTS_2, FRACTIONS_2, COLOR_2];

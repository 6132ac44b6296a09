//! Word pool for target words
//!
//! One word per level. A run that clears every word in the pool is a victory.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Dialect words players spell, one per level
pub const WORDS: &[&str] = &[
    "абен", "абич", "ала", "артиса", "артише", "бадива", "балдър", "балдисам", "бам бадива",
    "банкова джанка", "бапка", "бара", "барабиняк", "бадънь", "батисал", "батисам",
    "бафнем", "башка", "бекярин", "бек ярин", "беломуняв", "беневреци", "бега", "бибе",
    "бибиткам", "битанка", "близним", "биковит", "бла", "бобовица", "ботор", "брез", "брег",
    "бреца", "брус", "бръмбайосканье", "бръстец", "буам", "бубам", "буедак",
    "бутурньоствам", "бучав", "бучеавица", "буцуняк", "бътвам се", "бювам", "бювоч",
    "вангълци", "вария", "варкам", "ваявица", "видело", "вепър", "влака", "врабче",
    "врабчово сръце", "вратница", "вратняк", "връло", "врътоглав", "врътокав", "гашник",
    "гецко", "гижа", "гламав", "глис", "глъчим", "гнявим", "гнякне", "гнясам", "гнясанье",
    "гньетем", "граваям", "гребаска", "грездей", "грома", "груава", "гръджав", "гръцмунь",
    "гуменици", "гъгнем", "гътне", "гьоджа", "гьоджаво", "гьостерица", "деййй", "дебре",
    "дедовия", "дека", "декам", "диня", "донадя", "донаюя", "донаюям", "дреньосвам",
    "дръва", "дръвя", "дръжайе", "дуд", "дудна", "дудне", "дуня", "джанарка", "джапам",
    "джваньок", "дживгар", "джинка", "джуруяк", "дзепам", "дзепам", "дзиндзирикам",
    "дзвръкла", "дзръкеле", "емвам", "ендък", "ептем", "ерча", "ечанка", "живодерняк",
    "жмулим", "жмуьо", "жояв", "жуберкам", "жуленье", "забъкнем", "забъквам", "заврътнячим",
    "за глава", "загрезва", "занемим", "запищен", "затиской", "затра", "изврънат",
    "изгъгвам", "гъгнем", "изджугам", "изжлембен", "изкилиферчил", "изклесяк", "изкорубен",
    "излундзи", "изместо", "изокам", "изребрим", "изрепчвам", "изтресквам", "изувам", "ияк",
    "иядим", "казма", "какаяшка", "кам", "камара", "камберица", "кандилкя", "кандисам",
    "караконяк", "качамилкя", "кикерчим", "кимвам", "кинем", "киселица", "кияк", "клапавци",
    "клес", "клесовиня", "клефунь", "клецам", "климбуцам", "ковнем", "козиняк", "колик",
    "коликав", "компир", "конощип", "коняк", "костеница", "котленкя", "кощрамба", "кракна",
    "креотим", "кротушка", "кръжа", "кръндей", "кръпей", "кукуруз", "кукуржянка", "кулен",
    "куртолисам", "куртулисам", "кута", "къдея", "кьорав", "кюфна", "кюца", "лаасе",
    "ландзим", "леа", "лендзя", "ливагье", "лигурище", "лизгам", "лис", "лиска",
    "лисковиня", "ломотим", "ломпар", "лубеница", "лугье", "лундзим", "лупнем", "льохав",
    "лъчкам", "магаза", "маица", "макя", "малешка", "манара", "манарче", "мандрамуняк",
    "мандръсам", "маторец", "мачка", "мердень", "мертек", "мечка", "мешина", "меям",
    "мирва", "митията овца", "мишка", "млъзе", "море", "мотовилкя", "мочам", "мръзлица",
    "муж", "муанем", "музувирлък", "мундза", "навияк", "нагньитам", "нагръчвам",
    "накостръжвам", "накостръжвам", "налундзим", "наплатисам", "натамия", "натрътил",
    "наюя", "непрекръшнячван", "неуметен", "нефелен", "ниел", "нога", "нужник", "обги",
    "образ", "огалатим", "огравазди", "ограваздим", "огръйе", "одекам", "оджак", "озяве",
    "озявница", "окам", "окапляк", "окикерчил", "олам", "олисветим", "олисел", "опалия",
    "опиня", "опростил", "опупен", "ореше", "орей", "отваа", "отдънък", "оти", "отма",
    "отоди", "отчръпна", "офянквам", "ояндзим", "паъздерки", "паздерки", "палаш",
    "паприкаш", "пелешки", "пенджер", "перашка", "печеняк", "пишлегар", "пищеж", "плавя",
    "плюска", "побуял", "поврачам", "поврътиням", "подфръкат", "пойдех", "полверняк",
    "поокръвям", "послушах", "пранги", "пребатам", "прекинем", "прекросним", "прекръшнячим",
    "прерипам", "пресламбачим", "претрошвам", "призне", "приклопим", "приоданец",
    "пристануша", "проглобен", "просуане", "пръвица", "пръделник", "пръжено", "пръйевина",
    "пръцела", "пуанем", "пукяшем", "пупа", "пупнем", "пъквам", "пьоска", "пюскам", "раат",
    "разжлембен", "разклимбучкан", "разландисвам", "размитам", "разпарчетосам", "рапнем",
    "разплул", "разпоретина", "разпръчвам", "разпоретина", "разпръчвам", "разчепанка",
    "ребрим", "репчим", "ресовачка", "ритли", "ручим", "ръски", "саньи", "светлосур",
    "свинак", "свинаковина", "сгняви", "сгруяк", "сгръчен", "син-котлен", "сине", "сисам",
    "скали", "склепаторен", "скомино", "скрибуцанье", "скоросмрътница", "скутам", "слуням",
    "слутам", "слутняк", "слушам", "смитам", "спареняк", "спаружен", "сплащам", "спотурам",
    "сприя", "стеня", "стока", "столовка", "стришам", "стръчвам", "стръчвам се", "суглет",
    "суек", "сур", "суросинкяв", "сурвам", "стъвиня се", "съвиня се", "съпикясвам",
    "сътвер", "съглам", "тай", "тай се", "тараба", "таралясник", "таферен", "тенчасам",
    "теферич", "трескам", "троним", "тръни", "тулуп", "турта", "тутма", "туч", "тъпкач",
    "удевам", "укьо", "улав", "урбулешката", "уруглица", "урунгел", "уруспия", "уяндзвам",
    "удзерепил", "улендзим", "умулузвам", "урапляк", "уръф(л)як", "ускоре", "учуван",
    "фараж", "фейско", "физгам", "фулиш", "цедило", "цепленка", "цифка", "цинка", "циу",
    "циция", "црън", "челенкя", "чеели", "чият", "чмим", "човещинка", "чръв", "чувам",
    "чудинка", "чучуято", "шака", "шанец", "шашав", "шашавица", "шашю", "швикам", "шиблики",
    "шибнем", "шийок", "шишим", "шмундел", "шпора", "шугавелняк", "шукна", "шунда", "шупя",
    "шуштава", "шушумига", "щрока", "юрвам", "юснем", "ягмосва",
];

/// Number of levels a full run can clear
pub fn level_count() -> u32 {
    WORDS.len() as u32
}

/// Uppercase glyphs of a word, spaces dropped
pub fn glyphs(word: &str) -> Vec<char> {
    word.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Pick a random word as glyphs
pub fn random_word<R: Rng + ?Sized>(rng: &mut R) -> Vec<char> {
    WORDS.choose(rng).map(|w| glyphs(w)).unwrap_or_default()
}

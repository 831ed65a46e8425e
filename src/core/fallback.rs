use crate::core::Article;

struct StaticArticle {
    title: &'static str,
    link: &'static str,
    pub_date: &'static str,
    description: &'static str,
    source: &'static str,
}

// 即時新聞無法取得時使用，順序固定
const FALLBACK_ARTICLES: [StaticArticle; 4] = [
    StaticArticle {
        title: "Proteção veicular cresce e já atende milhões de motoristas no Brasil",
        link: "https://news.google.com/search?q=prote%C3%A7%C3%A3o+veicular",
        pub_date: "Mon, 04 Mar 2024 12:00:00 GMT",
        description: "Associações de proteção veicular ampliam a base de associados com planos mais acessíveis que o seguro tradicional.",
        source: "Google News",
    },
    StaticArticle {
        title: "Como consultar a situação de um veículo pela placa antes da compra",
        link: "https://news.google.com/search?q=consulta+placa+ve%C3%ADculo",
        pub_date: "Fri, 16 Feb 2024 09:30:00 GMT",
        description: "Verificar débitos, restrições e histórico do veículo evita prejuízos na compra de um usado.",
        source: "Google News",
    },
    StaticArticle {
        title: "Roubo e furto de veículos: saiba como se proteger",
        link: "https://news.google.com/search?q=roubo+furto+ve%C3%ADculos",
        pub_date: "Tue, 23 Jan 2024 15:45:00 GMT",
        description: "Rastreadores, seguro e proteção veicular estão entre as medidas recomendadas por especialistas.",
        source: "Google News",
    },
    StaticArticle {
        title: "Regulamentação da proteção veicular avança no Congresso",
        link: "https://news.google.com/search?q=regulamenta%C3%A7%C3%A3o+prote%C3%A7%C3%A3o+veicular",
        pub_date: "Wed, 10 Jan 2024 18:20:00 GMT",
        description: "Novas regras devem trazer mais segurança jurídica para associações e associados.",
        source: "Google News",
    },
];

pub fn fallback_articles() -> Vec<Article> {
    FALLBACK_ARTICLES
        .iter()
        .map(|a| Article {
            title: a.title.to_string(),
            link: a.link.to_string(),
            pub_date: a.pub_date.to_string(),
            description: a.description.to_string(),
            source: a.source.to_string(),
        })
        .collect()
}

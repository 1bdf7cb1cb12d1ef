//! The variant catalog shipped with trellis.
//!
//! Registry content, not logic: records for the `sveltin` and `blank` themes
//! across the known styling frameworks, plus the shared fallbacks that keep
//! sparse cells of the matrix serviceable.

use trellis_manifest::{StylingId, ThemeId};

use crate::variant::{Applicability, ArtifactKind, BindingKey, PreprocessStage, TemplateVariant};

/// Theme identifiers with dedicated catalog content.
pub const BUILTIN_THEMES: [&str; 2] = ["sveltin", "blank"];

/// All variants of the shipped catalog.
pub fn variants() -> Vec<TemplateVariant> {
    let sveltin = ThemeId::new("sveltin").expect("builtin theme id");
    let blank = ThemeId::new("blank").expect("builtin theme id");

    let mut all = vec![
        // Bundler configs. Exact cells exist where the preprocess wiring
        // differs per styling; the tiered defaults cover the rest.
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::Exact {
                theme: sveltin.clone(),
                styling: StylingId::TailwindCss,
            },
            slots: bundler_slots(),
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: BUNDLER_POSTCSS.to_string(),
        },
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::Exact {
                theme: sveltin.clone(),
                styling: StylingId::Scss,
            },
            slots: bundler_slots(),
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: BUNDLER_SCSS.to_string(),
        },
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::ThemeDefault {
                theme: sveltin.clone(),
            },
            slots: bundler_slots(),
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: BUNDLER_PLAIN.to_string(),
        },
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::ThemeDefault {
                theme: blank.clone(),
            },
            slots: bundler_blank_slots(),
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: BUNDLER_BLANK.to_string(),
        },
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::Shared,
            slots: bundler_slots(),
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: BUNDLER_PLAIN.to_string(),
        },
        // Markdown preprocessing config is theme-independent by construction.
        TemplateVariant {
            kind: ArtifactKind::Markdown,
            applicability: Applicability::Shared,
            slots: vec![BindingKey::MarkdownFragment],
            preprocess: vec![PreprocessStage::Markdown],
            body: MARKDOWN_CONFIG.to_string(),
        },
        // Shared CSS pipeline fallback for themes without dedicated content.
        TemplateVariant {
            kind: ArtifactKind::CssPipeline,
            applicability: Applicability::Shared,
            slots: vec![],
            preprocess: vec![PreprocessStage::Css],
            body: PIPELINE_VANILLA.to_string(),
        },
    ];

    // CSS pipeline content is keyed by styling and identical across the
    // builtin themes, so fill the exact cells from one body per styling.
    for theme in [&sveltin, &blank] {
        for styling in StylingId::ALL {
            all.push(TemplateVariant {
                kind: ArtifactKind::CssPipeline,
                applicability: Applicability::Exact {
                    theme: theme.clone(),
                    styling,
                },
                slots: css_pipeline_slots(styling),
                preprocess: vec![PreprocessStage::Css],
                body: css_pipeline_body(styling).to_string(),
            });
        }
    }

    all
}

fn bundler_slots() -> Vec<BindingKey> {
    vec![
        BindingKey::AdapterPages,
        BindingKey::AdapterAssets,
        BindingKey::AdapterFallback,
        BindingKey::AdapterPrecompress,
        BindingKey::AdapterStrict,
        BindingKey::AliasConfig,
        BindingKey::AliasContent,
        BindingKey::AliasLib,
        BindingKey::AliasThemes,
    ]
}

fn bundler_blank_slots() -> Vec<BindingKey> {
    let mut slots = vec![BindingKey::MarkdownExtensions];
    slots.extend(bundler_slots());
    slots
}

fn css_pipeline_slots(styling: StylingId) -> Vec<BindingKey> {
    match styling {
        StylingId::TailwindCss => vec![BindingKey::AliasLib, BindingKey::AliasThemes],
        _ => vec![],
    }
}

fn css_pipeline_body(styling: StylingId) -> &'static str {
    match styling {
        StylingId::TailwindCss => PIPELINE_TAILWIND,
        StylingId::UnoCss => PIPELINE_UNO,
        StylingId::VanillaCss => PIPELINE_VANILLA,
        StylingId::Scss => PIPELINE_SCSS,
        StylingId::Bulma => PIPELINE_BULMA,
        StylingId::Bootstrap => PIPELINE_BOOTSTRAP,
    }
}

const BUNDLER_POSTCSS: &str = r#"import path from 'path';
import { mdsvex } from 'mdsvex';
import mdsvexConfig from './mdsvex.config.js';
import preprocess from 'svelte-preprocess';
import adapter from '@sveltejs/adapter-static';

/** @type {import('@sveltejs/kit').Config} */
const config = {
	extensions: ['.svelte', ...mdsvexConfig.extensions],
	preprocess: [
		mdsvex(mdsvexConfig),
		preprocess({
			postcss: true,
			preserve: ['ld+json'],
		}),
	],
	kit: {
		adapter: adapter({
			pages: {{ adapter.pages }},
			assets: {{ adapter.assets }},
			fallback: {{ adapter.fallback }},
			precompress: {{ adapter.precompress }},
			strict: {{ adapter.strict }},
		}),
		prerender: {
			crawl: true,
			entries: ['*'],
			handleMissingId: 'ignore',
		},
		alias: {
			$config: path.resolve({{ alias.config }}),
			$content: path.resolve({{ alias.content }}),
			$lib: path.resolve({{ alias.lib }}),
			$themes: path.resolve({{ alias.themes }}),
		},
	},
};

export default config;
"#;

const BUNDLER_SCSS: &str = r#"import path from 'path';
import { mdsvex } from 'mdsvex';
import mdsvexConfig from './mdsvex.config.js';
import preprocess from 'svelte-preprocess';
import adapter from '@sveltejs/adapter-static';

/** @type {import('@sveltejs/kit').Config} */
const config = {
	extensions: ['.svelte', ...mdsvexConfig.extensions],
	preprocess: [
		mdsvex(mdsvexConfig),
		preprocess({
			preserve: ['ld+json'],
			scss: {
				prependData: '@use "src/variables.scss" as *;',
			},
		}),
	],
	kit: {
		adapter: adapter({
			pages: {{ adapter.pages }},
			assets: {{ adapter.assets }},
			fallback: {{ adapter.fallback }},
			precompress: {{ adapter.precompress }},
			strict: {{ adapter.strict }},
		}),
		prerender: {
			crawl: true,
			entries: ['*'],
			handleMissingId: 'ignore',
		},
		alias: {
			$config: path.resolve({{ alias.config }}),
			$content: path.resolve({{ alias.content }}),
			$lib: path.resolve({{ alias.lib }}),
			$themes: path.resolve({{ alias.themes }}),
		},
	},
};

export default config;
"#;

const BUNDLER_PLAIN: &str = r#"import path from 'path';
import { mdsvex } from 'mdsvex';
import mdsvexConfig from './mdsvex.config.js';
import preprocess from 'svelte-preprocess';
import adapter from '@sveltejs/adapter-static';

/** @type {import('@sveltejs/kit').Config} */
const config = {
	extensions: ['.svelte', ...mdsvexConfig.extensions],
	preprocess: [
		mdsvex(mdsvexConfig),
		preprocess({
			preserve: ['ld+json'],
		}),
	],
	kit: {
		adapter: adapter({
			pages: {{ adapter.pages }},
			assets: {{ adapter.assets }},
			fallback: {{ adapter.fallback }},
			precompress: {{ adapter.precompress }},
			strict: {{ adapter.strict }},
		}),
		prerender: {
			crawl: true,
			entries: ['*'],
		},
		alias: {
			$config: path.resolve({{ alias.config }}),
			$content: path.resolve({{ alias.content }}),
			$lib: path.resolve({{ alias.lib }}),
			$themes: path.resolve({{ alias.themes }}),
		},
	},
};

export default config;
"#;

const BUNDLER_BLANK: &str = r#"import path from 'path';
import { mdsvex } from 'mdsvex';
import mdsvexConfig from './mdsvex.config.js';
import preprocess from 'svelte-preprocess';
import adapter from '@sveltejs/adapter-static';

/** @type {import('@sveltejs/kit').Config} */
const config = {
	extensions: ['.svelte', ...{{ markdown.extensions }}],
	preprocess: [mdsvex(mdsvexConfig), preprocess()],
	kit: {
		adapter: adapter({
			pages: {{ adapter.pages }},
			assets: {{ adapter.assets }},
			fallback: {{ adapter.fallback }},
			precompress: {{ adapter.precompress }},
			strict: {{ adapter.strict }},
		}),
		alias: {
			$config: path.resolve({{ alias.config }}),
			$content: path.resolve({{ alias.content }}),
			$lib: path.resolve({{ alias.lib }}),
			$themes: path.resolve({{ alias.themes }}),
		},
	},
};

export default config;
"#;

const MARKDOWN_CONFIG: &str = r#"import { defineMDSveXConfig as defineConfig } from 'mdsvex';
import relativeImages from 'mdsvex-relative-images';

import emoji from 'remark-emoji';
import remarkSlug from 'remark-slug';
import readingTime from 'remark-reading-time';
import rehypeAutolinkHeadings from 'rehype-autolink-headings';
import rehypeExternalLinks from 'rehype-external-links';

const mdsvexConfig = defineConfig({
{{ markdown.fragment }}
});

export default mdsvexConfig;
"#;

const PIPELINE_TAILWIND: &str = r#"const path = require('path');
const plugin = require('tailwindcss/plugin');

const config = {
	content: [
		'./src/routes/**/*.{html,svelte,js,ts}',
		path.join({{ alias.lib }}, '**/*.{html,svelte,js,ts}'),
		path.join({{ alias.themes }}, '**/*.{html,svelte,js,ts}'),
	],
	theme: {
		extend: {},
	},
	plugins: [
		require('@tailwindcss/typography'),
		require('@tailwindcss/aspect-ratio'),
	],
};

module.exports = config;
"#;

const PIPELINE_UNO: &str = r#"import { defineConfig, presetTypography, presetUno } from 'unocss';
import extractorSvelte from '@unocss/extractor-svelte';

export default defineConfig({
	extractors: [extractorSvelte()],
	presets: [presetUno(), presetTypography()],
});
"#;

const PIPELINE_VANILLA: &str = r#"const cssnano = require('cssnano');

const mode = process.env.NODE_ENV;
const dev = mode === 'development';

const config = {
	plugins: [
		require('postcss-import'),
		require('autoprefixer'),
		!dev &&
			cssnano({
				preset: 'default',
			}),
	],
};

module.exports = config;
"#;

const PIPELINE_SCSS: &str = r#"// scss sources are compiled by svelte-preprocess; postcss runs afterwards.
const cssnano = require('cssnano');

const mode = process.env.NODE_ENV;
const dev = mode === 'development';

const config = {
	plugins: [
		require('autoprefixer'),
		!dev &&
			cssnano({
				preset: 'default',
			}),
	],
};

module.exports = config;
"#;

const PIPELINE_BULMA: &str = r#"// bulma is pulled in through src/variables.scss (@use 'bulma/bulma').
const cssnano = require('cssnano');

const mode = process.env.NODE_ENV;
const dev = mode === 'development';

const config = {
	plugins: [
		require('autoprefixer'),
		!dev &&
			cssnano({
				preset: 'default',
			}),
	],
};

module.exports = config;
"#;

const PIPELINE_BOOTSTRAP: &str = r#"// bootstrap is pulled in through src/variables.scss (@use 'bootstrap/scss/bootstrap').
const cssnano = require('cssnano');

const mode = process.env.NODE_ENV;
const dev = mode === 'development';

const config = {
	plugins: [
		require('autoprefixer'),
		!dev &&
			cssnano({
				preset: 'default',
			}),
	],
};

module.exports = config;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VariantRegistry;

    #[test]
    fn builtin_covers_every_kind_for_builtin_cells() {
        let registry = VariantRegistry::builtin();
        for theme in BUILTIN_THEMES {
            let theme = ThemeId::new(theme).unwrap();
            for styling in StylingId::ALL {
                for kind in ArtifactKind::ALL {
                    assert!(
                        registry.resolve(&theme, styling, kind).is_ok(),
                        "missing variant for {theme}/{styling}/{kind}"
                    );
                }
            }
        }
    }

    #[test]
    fn builtin_serves_unknown_themes_from_the_shared_tier() {
        let registry = VariantRegistry::builtin();
        let theme = ThemeId::new("unknown-theme").unwrap();
        for kind in ArtifactKind::ALL {
            let variant = registry.resolve(&theme, StylingId::TailwindCss, kind).unwrap();
            assert_eq!(variant.applicability, Applicability::Shared);
        }
    }

    #[test]
    fn every_declared_slot_appears_in_its_body() {
        for variant in variants() {
            for slot in &variant.slots {
                let token = format!("{{{{ {} }}}}", slot.as_str());
                assert!(
                    variant.body.contains(&token),
                    "{}/{:?} body is missing declared slot {}",
                    variant.kind,
                    variant.applicability,
                    slot
                );
            }
        }
    }
}

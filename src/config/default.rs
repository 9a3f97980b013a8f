// Simply contains the default YAML config for generation and the built-in
// header templates.
pub const DEFAULT_CONFIG: &str = r##"
# Name written into the Author field of every header.
author: Your Name Here

# Copyright holder, usually a company or your own name again.
company: Your Company

# Copyright year. Leave empty to always use the current year.
year: ""

# Only files with these extensions get a header. An empty list means
# every file is considered.
extensions:
  - .ts
  - .vue

# Directories with these names are never descended into.
exclude_dirs:
  - node_modules
  - .git
  - dist

# Wrap long header lines (like a lengthy description) at this column.
# columns: 80

# Enable the larger Vue/TypeScript rule set (layouts, pages, router, api,
# models, tests, ...) and language aware fallback descriptions.
extended_rules: false

# Which template applies to which extension. Anything not listed uses
# the "default" template.
template_keys:
  .vue: vue
  .py: hash
  .sh: hash

# Header templates. When this section is missing the built-in templates
# are used. Available placeholders are {{FILE_NAME}}, {{AUTHOR}},
# {{COMPANY}}, {{YEAR}} and {{DESCRIPTION}}. A template is either a
# string, a list of lines, or a map with a body and a marker. The marker
# is the text used to recognise an existing header, when omitted it is
# taken from the line holding {{FILE_NAME}}.
#
# templates:
#   default: |
#     /*
#     File Name: {{FILE_NAME}}
#     Author: {{AUTHOR}}
#     Description: {{DESCRIPTION}}
#     Copyright (c) {{YEAR}} {{COMPANY}}
#     */
#   vue:
#     marker: "File Name:"
#     body:
#       - "<!--"
#       - "File Name: {{FILE_NAME}}"
#       - "Description: {{DESCRIPTION}}"
#       - "-->"
"##;

pub const DEFAULT_TEMPLATES: &str = r##"
default: |
  /*
  File Name: {{FILE_NAME}}
  Author: {{AUTHOR}}
  Description: {{DESCRIPTION}}
  Copyright (c) {{YEAR}} {{COMPANY}}

  Permission is hereby granted, free of charge, to any person obtaining a copy
  of this software and associated documentation files (the 'Software'), to deal
  in the Software without restriction, including without limitation the rights
  to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
  copies of the Software, and to permit persons to whom the Software is
  furnished to do so, subject to the following conditions:

  The above copyright notice and this permission notice shall be included in
  all copies or substantial portions of the Software.

  THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
  IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
  OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
  THE SOFTWARE.
  */
vue: |
  <!--
  /**
  File Name: {{FILE_NAME}}
  Author: {{AUTHOR}}
  Description: {{DESCRIPTION}}
  Copyright (c) {{YEAR}} {{COMPANY}}

  Permission is hereby granted, free of charge, to any person obtaining a copy
  of this software and associated documentation files (the 'Software'), to deal
  in the Software without restriction, including without limitation the rights
  to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
  copies of the Software, and to permit persons to whom the Software is
  furnished to do so, subject to the following conditions:

  The above copyright notice and this permission notice shall be included in
  all copies or substantial portions of the Software.

  THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
  IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
  OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
  THE SOFTWARE.
  */
  -->
hash:
  - "#"
  - "# File Name: {{FILE_NAME}}"
  - "# Author: {{AUTHOR}}"
  - "# Description: {{DESCRIPTION}}"
  - "# Copyright (c) {{YEAR}} {{COMPANY}}"
  - "#"
  - "# Permission is hereby granted, free of charge, to any person obtaining a copy"
  - "# of this software and associated documentation files (the 'Software'), to deal"
  - "# in the Software without restriction, including without limitation the rights"
  - "# to use, copy, modify, merge, publish, distribute, sublicense, and/or sell"
  - "# copies of the Software, and to permit persons to whom the Software is"
  - "# furnished to do so, subject to the following conditions:"
  - "#"
  - "# The above copyright notice and this permission notice shall be included in"
  - "# all copies or substantial portions of the Software."
  - "#"
  - "# THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR"
  - "# IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,"
  - "# FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE"
  - "# AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER"
  - "# LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,"
  - "# OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN"
  - "# THE SOFTWARE."
  - "#"
"##;

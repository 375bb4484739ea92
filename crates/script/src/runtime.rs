//! Python helper functions emitted verbatim into every generated script.
//!
//! `get_value` walks a parsed input (ElementTree element, dict or list) along
//! a field path and returns `None` on any missed step. Elements are told
//! apart by their `attrib` mapping, so strings and numbers never match. `set_nested_value`
//! writes into the output dict, creating containers on the way; numeric
//! segments address list positions.

pub const SPLIT_PATH: &str = r#"def split_path(path):
    parts = []
    current = ''
    depth = 0
    for char in path:
        if char == '[':
            depth += 1
        elif char == ']':
            depth = max(depth - 1, 0)
        elif char == '.' and depth == 0:
            if current:
                parts.append(current)
            current = ''
            continue
        current += char
    if current:
        parts.append(current)
    return parts"#;

pub const PARSE_PREDICATE: &str = r#"def parse_predicate(predicate):
    if not predicate.startswith('@') or '=' not in predicate:
        return None, None
    attr_name, _, attr_value = predicate[1:].partition('=')
    return attr_name.strip(), attr_value.strip().strip('\'"')"#;

pub const GET_VALUE: &str = r#"def get_value(data, path):
    keys = split_path(path)
    value = data

    # Children of a namespaced root are looked up in the root's namespace first
    namespace = ''
    if hasattr(data, 'tag') and '}' in data.tag:
        namespace = data.tag.split('}')[0] + '}'

    for i, key in enumerate(keys):
        if isinstance(value, dict):
            value = value.get(key)
        elif isinstance(value, list):
            if key.isdigit():
                index = int(key)
                value = value[index] if index < len(value) else None
            elif value and isinstance(value[0], dict):
                value = value[0].get(key)
            else:
                return None
        elif hasattr(value, 'attrib'):
            if key.startswith('@_'):
                return value.attrib.get(key[2:])

            if key.isdigit():
                continue

            if '[' in key and key.endswith(']'):
                element_name = key[:key.index('[')]
                attr_name, attr_value = parse_predicate(key[key.index('[') + 1:-1])
                if attr_name is not None:
                    candidates = value.findall(namespace + element_name) if namespace else []
                    if not candidates:
                        candidates = value.findall(element_name)
                    for child in candidates:
                        if child.attrib.get(attr_name) == attr_value:
                            value = child
                            break
                    else:
                        return None
                    continue
                key = element_name

            if i == 0 and hasattr(data, 'tag'):
                root_name = data.tag.split('}')[-1]
                if key == root_name:
                    continue

            child = value.find(namespace + key) if namespace else value.find(key)
            if child is None and namespace:
                child = value.find(key)
            if child is None:
                return None
            value = child
        else:
            return None

        if value is None:
            return None

    if hasattr(value, 'attrib'):
        return value.text
    return value"#;

pub const SET_NESTED_VALUE: &str = r#"def _empty_container(key):
    return [] if key.isdigit() else {}


def set_nested_value(obj, path, value):
    keys = split_path(path)
    current = obj
    for i, key in enumerate(keys):
        if isinstance(current, list):
            if not key.isdigit():
                return
            slot = int(key)
            while len(current) <= slot:
                current.append({})
        else:
            slot = key

        if i == len(keys) - 1:
            current[slot] = value
            return

        next_key = keys[i + 1]
        existing = current[slot] if isinstance(current, list) else current.get(slot)
        if not isinstance(existing, (dict, list)) or (existing == {} and next_key.isdigit()):
            existing = _empty_container(next_key)
            current[slot] = existing
        current = existing"#;
